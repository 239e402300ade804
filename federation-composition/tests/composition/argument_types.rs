use pretty_assertions::assert_eq;
use rstest::rstest;

use super::assert_contains_graphql;
use super::compose_services;
use super::error_codes;
use super::service;

#[rstest]
#[case::nullable_in_one_subgraph("Int", "Int!", "users(first: Int!): [String]")]
#[case::non_null_list("[[ID!]]", "[[ID!]]!", "users(first: [[ID!]]!): [String]")]
fn merges_compatible_argument_types(
    #[case] a: &str,
    #[case] b: &str,
    #[case] expected: &str,
) {
    let a = format!("type Query {{ users(first: {a}): [String] }}");
    let b = format!("type Query {{ users(first: {b}): [String] }}");
    let supergraph = compose_services(&[service("a", &a), service("b", &b)]).unwrap();
    assert_contains_graphql(supergraph.supergraph_sdl(), expected);
}

#[test]
fn rejects_incompatible_field_argument_types() {
    let errors = compose_services(&[
        service("a", "type Query { users(first: Int): [String] }"),
        service("b", "type Query { users(first: String): [String] }"),
    ])
    .unwrap_err();
    assert_eq!(error_codes(&errors), vec!["FIELD_ARGUMENT_TYPE_MISMATCH"]);
    assert_eq!(
        errors[0].to_string(),
        r#"Type of argument "Query.users(first:)" is incompatible across subgraphs: it has type "Int" in subgraph "a" but type "String" in subgraph "b""#
    );
}

#[test]
fn rejects_list_and_scalar_arguments() {
    let errors = compose_services(&[
        service("a", "type Query { users(ids: [ID]): [String] }"),
        service("b", "type Query { users(ids: ID): [String] }"),
        service("c", "type Query { users(ids: [ID!]!): [String] }"),
        service("d", "type Query { users(ids: [ID]!): [String] }"),
    ])
    .unwrap_err();
    assert_eq!(
        errors[0].to_string(),
        r#"Type of argument "Query.users(ids:)" is incompatible across subgraphs: it has type "[ID]!" in subgraphs "a", "d" but type "ID" in subgraph "b" and type "[ID!]!" in subgraph "c""#
    );
}

#[test]
fn rejects_incompatible_arguments_of_shared_executable_directives() {
    let errors = compose_services(&[
        service("a", "directive @a(n: Int) on FIELD type Query { a: Int }"),
        service("b", "directive @a(n: Boolean) on FIELD type Query { b: Int }"),
    ])
    .unwrap_err();
    assert_eq!(error_codes(&errors), vec!["FIELD_ARGUMENT_TYPE_MISMATCH"]);
    assert_eq!(
        errors[0].to_string(),
        r#"Type of argument "@a(n:)" is incompatible across subgraphs: it has type "Int" in subgraph "a" but type "Boolean" in subgraph "b""#
    );
}

#[test]
fn ignores_arguments_of_directives_dropped_from_the_supergraph() {
    let supergraph = compose_services(&[
        service("a", "directive @a(n: Int) on FIELD type Query { a: Int }"),
        service("b", "directive @a(n: Boolean) on FIELD type Query { b: Int }"),
        service("c", "type Query { c: Int }"),
    ]);
    assert!(supergraph.is_ok());
}

use federation_composition::CompositionOptions;
use insta::assert_json_snapshot;
use pretty_assertions::assert_eq;

use super::compose_services;
use super::compose_services_with_options;
use super::error_codes;
use super::service;

#[test]
fn reports_every_error_at_once() {
    let errors = compose_services(&[
        service(
            "a",
            r#"
            type Query { users(first: Int = 10): [User] }
            type User { id: ID! }
            interface Node { id: ID! }
            "#,
        ),
        service(
            "b",
            r#"
            type Query { users(first: Int = 20): [User] }
            type User { id: String }
            type Node { id: ID! }
            "#,
        ),
    ])
    .unwrap_err();
    let output: Vec<_> = errors
        .iter()
        .map(federation_composition::error::ErrorOutput::from)
        .collect();
    assert_json_snapshot!(output, @r###"
    [
      {
        "message": "Type \"Node\" has mismatched kind: it is defined as Interface Type in subgraph \"a\" but Object Type in subgraph \"b\"",
        "code": "TYPE_KIND_MISMATCH"
      },
      {
        "message": "Argument \"Query.users(first:)\" has incompatible default values across subgraphs: it has default value 10 in subgraph \"a\" but default value 20 in subgraph \"b\"",
        "code": "FIELD_ARGUMENT_DEFAULT_MISMATCH"
      },
      {
        "message": "Type of field \"User.id\" is incompatible across subgraphs: it has type \"ID!\" in subgraph \"a\" but type \"String\" in subgraph \"b\"",
        "code": "FIELD_TYPE_MISMATCH"
      }
    ]
    "###);
}

#[test]
fn required_arguments_must_appear_in_every_subgraph() {
    let errors = compose_services(&[
        service("a", "type Query { users(first: Int!): [String] }"),
        service("b", "type Query { users: [String] }"),
    ])
    .unwrap_err();
    assert_eq!(
        error_codes(&errors),
        vec!["REQUIRED_ARGUMENT_MISSING_IN_SOME_SUBGRAPH"]
    );
}

#[test]
fn input_objects_keep_their_common_fields() {
    let errors = compose_services(&[
        service(
            "a",
            "type Query { a(filter: Filter): Int } input Filter { name: String! }",
        ),
        service(
            "b",
            "type Query { b(filter: Filter): Int } input Filter { age: Int }",
        ),
    ])
    .unwrap_err();
    assert_eq!(
        error_codes(&errors),
        vec![
            "EMPTY_MERGED_INPUT_TYPE",
            "REQUIRED_INPUT_FIELD_MISSING_IN_SOME_SUBGRAPH"
        ]
    );
    assert_eq!(
        errors[1].to_string(),
        r#"Input object field "Filter.name" is required in some subgraphs but does not appear in all subgraphs: it is required in subgraph "a" but does not appear in subgraph "b""#
    );
}

#[test]
fn disabled_rules_are_skipped() {
    let services = [
        service("a", "type Query { users(first: Int = 10): [String] }"),
        service("b", "type Query { users(first: Int = 20): [String] }"),
    ];
    assert_eq!(
        error_codes(&compose_services(&services).unwrap_err()),
        vec!["FIELD_ARGUMENT_DEFAULT_MISMATCH"]
    );

    let options = CompositionOptions {
        disabled_rules: vec!["FieldArgumentDefaultsRule".to_owned()],
    };
    let supergraph = compose_services_with_options(&services, &options).unwrap();
    assert!(
        supergraph
            .supergraph_sdl()
            .contains("users(first: Int = 10): [String]")
    );
}

#[test]
fn reports_invalid_subgraph_sdl() {
    let errors = compose_services(&[service("a", "type Query {")]).unwrap_err();
    assert_eq!(error_codes(&errors), vec!["INVALID_GRAPHQL"]);
}

use insta::assert_snapshot;
use pretty_assertions::assert_eq;

use super::ServiceDefinition;
use super::assert_contains_graphql;
use super::compose_services;
use super::error_codes;

#[test]
fn rejects_subgraphs_with_the_same_name() {
    let errors = compose_services(&[
        ServiceDefinition {
            name: "foo",
            url: Some("http://foo.com"),
            type_defs: "type Query { foo: String }",
        },
        ServiceDefinition {
            name: "foo",
            url: Some("http://foo.com"),
            type_defs: "type Query { bar: String }",
        },
    ])
    .unwrap_err();
    assert_eq!(error_codes(&errors), vec!["DUPLICATE_SUBGRAPH_NAME"]);
    assert_snapshot!(errors[0], @"A subgraph named foo already exists");
}

#[test]
fn suffixes_names_that_only_differ_in_case() {
    let supergraph = compose_services(&[
        ServiceDefinition {
            name: "Foo",
            url: Some("http://foo.com"),
            type_defs: "type Query { foo: String }",
        },
        ServiceDefinition {
            name: "foo",
            url: Some("http://bar.com"),
            type_defs: "type Query { bar: String }",
        },
    ])
    .unwrap();
    assert_contains_graphql(
        supergraph.supergraph_sdl(),
        r#"
        enum join__Graph {
          FOO_1 @join__graph(name: "Foo", url: "http://foo.com")
          FOO_2 @join__graph(name: "foo", url: "http://bar.com")
        }
        "#,
    );
    assert_contains_graphql(
        supergraph.supergraph_sdl(),
        r#"
        type Query @join__type(graph: FOO_1) @join__type(graph: FOO_2) {
          foo: String @join__field(graph: FOO_1)
          bar: String @join__field(graph: FOO_2)
        }
        "#,
    );
}

#[test]
fn subgraphs_may_share_a_url() {
    let supergraph = compose_services(&[
        ServiceDefinition {
            name: "users",
            url: Some("http://shared.com"),
            type_defs: "type Query { me: String }",
        },
        ServiceDefinition {
            name: "posts",
            url: Some("http://shared.com"),
            type_defs: "type Query { posts: [String] }",
        },
    ])
    .unwrap();
    let urls: Vec<_> = supergraph
        .graphs()
        .iter()
        .map(|graph| graph.url.as_deref())
        .collect();
    assert_eq!(urls, vec![Some("http://shared.com"); 2]);
}

#[test]
fn missing_urls_are_emitted_empty() {
    let supergraph = compose_services(&[ServiceDefinition {
        name: "users",
        url: None,
        type_defs: "type Query { me: String }",
    }])
    .unwrap();
    assert_contains_graphql(
        supergraph.supergraph_sdl(),
        r#"USERS @join__graph(name: "users", url: "")"#,
    );
}

#[test]
fn rejects_names_sharing_an_enum_value() {
    let errors = compose_services(&[
        ServiceDefinition {
            name: "a-b",
            url: None,
            type_defs: "type Query { a: String }",
        },
        ServiceDefinition {
            name: "a_b",
            url: None,
            type_defs: "type Query { b: String }",
        },
    ])
    .unwrap_err();
    assert_eq!(error_codes(&errors), vec!["INVALID_SUBGRAPH_NAME"]);
    assert_snapshot!(
        errors[0],
        @r###"Subgraphs "a-b" and "a_b" would both be represented by the join__Graph enum value A_B"###
    );
}

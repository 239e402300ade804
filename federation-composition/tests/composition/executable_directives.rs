use rstest::rstest;

use super::assert_contains_graphql;
use super::compose_services;
use super::contains_graphql;
use super::federation_link;
use super::service;

#[rstest]
fn retains_directives_declared_by_every_subgraph(#[values("v2.0", "v2.3")] version: &str) {
    let link = federation_link(version, r#""@key""#);
    let a = format!("{link}\ndirective @a on FIELD\ntype Query {{ a: Int }}");
    let b = format!("{link}\ndirective @a on FIELD\ntype Query {{ b: Int }}");
    let supergraph = compose_services(&[service("a", &a), service("b", &b)]).unwrap();
    assert_contains_graphql(supergraph.supergraph_sdl(), "directive @a on FIELD");
}

#[test]
fn omits_directives_missing_from_a_subgraph() {
    let supergraph = compose_services(&[
        service("a", "directive @a on FIELD type Query { a: Int }"),
        service("b", "type Query { b: Int }"),
    ])
    .unwrap();
    assert!(!contains_graphql(supergraph.supergraph_sdl(), "directive @a"));
}

#[test]
fn keeps_the_locations_shared_by_every_subgraph() {
    let supergraph = compose_services(&[
        service(
            "a",
            "directive @a on FIELD | QUERY | MUTATION type Query { a: Int }",
        ),
        service("b", "directive @a on MUTATION | FIELD type Query { b: Int }"),
    ])
    .unwrap();
    assert_contains_graphql(
        supergraph.supergraph_sdl(),
        "directive @a on FIELD | MUTATION",
    );
}

#[test]
fn removes_directives_without_a_shared_location() {
    let supergraph = compose_services(&[
        service("a", "directive @a on FIELD type Query { a: Int }"),
        service("b", "directive @a on QUERY type Query { b: Int }"),
    ])
    .unwrap();
    assert!(!contains_graphql(supergraph.supergraph_sdl(), "directive @a"));
}

#[test]
fn keeps_only_executable_locations_of_directives_not_composed() {
    let supergraph = compose_services(&[
        service(
            "a",
            "directive @a on FIELD | FIELD_DEFINITION type Query { a: Int @a }",
        ),
        service(
            "b",
            "directive @a on FIELD | FIELD_DEFINITION type Query { b: Int @a }",
        ),
    ])
    .unwrap();
    let sdl = supergraph.supergraph_sdl();
    assert_contains_graphql(sdl, "directive @a on FIELD");
    assert!(!contains_graphql(sdl, "directive @a on FIELD | FIELD_DEFINITION"));
    assert_contains_graphql(sdl, "a: Int @join__field(graph: A)");
}

#[test]
fn requires_every_subgraph_to_declare_repeatable() {
    let supergraph = compose_services(&[
        service("a", "directive @a repeatable on FIELD type Query { a: Int }"),
        service("b", "directive @a on FIELD type Query { b: Int }"),
    ])
    .unwrap();
    assert_contains_graphql(supergraph.supergraph_sdl(), "directive @a on FIELD");
    assert!(!contains_graphql(
        supergraph.supergraph_sdl(),
        "directive @a repeatable"
    ));
}

#[rstest]
fn composed_directives_keep_type_system_locations(#[values("v2.1", "v2.3")] version: &str) {
    let link = federation_link(version, r#""@composeDirective""#);
    let compose_a = format!(
        "{link}\n  @link(url: \"https://myspecs.dev/a/v1.0\", import: [\"@a\"])\n  @composeDirective(name: \"@a\")"
    );
    let a = format!(
        "{compose_a}\ndirective @a on FIELD | FIELD_DEFINITION\ntype Query {{ a: Int @a }}"
    );
    let b = format!(
        "{compose_a}\ndirective @a on FIELD | FIELD_DEFINITION\ntype Query {{ b: Int @a }}"
    );
    let supergraph = compose_services(&[service("a", &a), service("b", &b)]).unwrap();
    let sdl = supergraph.supergraph_sdl();
    assert_contains_graphql(sdl, "directive @a on FIELD | FIELD_DEFINITION");
    assert_contains_graphql(
        sdl,
        r#"
        type Query @join__type(graph: A) @join__type(graph: B) {
          a: Int @a @join__field(graph: A)
          b: Int @a @join__field(graph: B)
        }
        "#,
    );
}

#[test]
fn directive_arguments_use_the_merged_types() {
    let supergraph = compose_services(&[
        service(
            "a",
            "directive @cached(ttl: Int = 60) on FIELD type Query { a: Int }",
        ),
        service(
            "b",
            "directive @cached(ttl: Int!) on FIELD type Query { b: Int }",
        ),
    ])
    .unwrap();
    assert_contains_graphql(
        supergraph.supergraph_sdl(),
        "directive @cached(ttl: Int! = 60) on FIELD",
    );
}

#[test]
fn drops_arguments_missing_from_a_subgraph() {
    let supergraph = compose_services(&[
        service("a", "directive @a(n: Int!) on FIELD type Query { a: Int }"),
        service("b", "directive @a on FIELD type Query { b: Int }"),
    ])
    .unwrap();
    let sdl = supergraph.supergraph_sdl();
    assert_contains_graphql(sdl, "directive @a on FIELD");
    assert!(!contains_graphql(sdl, "directive @a(n: Int!)"));
}

#[test]
fn composed_executable_directives_gain_their_type_system_usages() {
    let link = federation_link("v2.3", r#""@composeDirective""#);
    let compose_a = format!(
        "{link}\n  @link(url: \"https://myspecs.dev/a/v1.0\", import: [\"@a\"])\n  @composeDirective(name: \"@a\")"
    );
    let a = format!("{compose_a}\ndirective @a on FIELD\ntype Query {{ a: Int @a }}");
    let b = format!("{compose_a}\ndirective @a on FIELD\ntype Query {{ b: Int @a }}");
    let supergraph = compose_services(&[service("a", &a), service("b", &b)]).unwrap();
    let sdl = supergraph.supergraph_sdl();
    assert_contains_graphql(sdl, "directive @a on FIELD | FIELD_DEFINITION");
    assert_contains_graphql(
        sdl,
        r#"
        type Query @join__type(graph: A) @join__type(graph: B) {
          a: Int @a @join__field(graph: A)
          b: Int @a @join__field(graph: B)
        }
        "#,
    );
}

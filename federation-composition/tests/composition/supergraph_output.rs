use federation_composition::CompositionOutput;
use insta::assert_json_snapshot;

use super::ServiceDefinition;
use super::assert_contains_graphql;
use super::compose_services;
use super::federation_link;

const KEY: &str = "directive @key(fields: String!, resolvable: Boolean = true) repeatable on OBJECT | INTERFACE";

fn products() -> String {
    format!(
        r#"
        {}
        {KEY}

        type Query {{
          topProducts: [Product!]!
        }}

        type Product @key(fields: "upc") {{
          upc: String!
          name: String!
          weight: Int
        }}
        "#,
        federation_link("v2.3", r#""@key""#)
    )
}

fn shipping() -> String {
    format!(
        r#"
        {}
        {KEY}
        directive @external on FIELD_DEFINITION
        directive @requires(fields: String!) on FIELD_DEFINITION

        type Product @key(fields: "upc") {{
          upc: String!
          weight: Int @external
          shippingEstimate: Int @requires(fields: "weight")
        }}
        "#,
        federation_link("v2.3", r#""@key", "@external", "@requires""#)
    )
}

fn reviews() -> String {
    format!(
        r#"
        {}
        {KEY}
        directive @provides(fields: String!) on FIELD_DEFINITION

        type Product @key(fields: "upc") {{
          upc: String!
          name: String
          reviews: [Review] @provides(fields: "author {{ name }}")
        }}

        type Review {{
          body: String
          author: String
        }}
        "#,
        federation_link("v2.3", r#""@key", "@provides""#)
    )
}

#[test]
fn merges_entities_across_subgraphs() {
    let (products, shipping, reviews) = (products(), shipping(), reviews());
    let supergraph = compose_services(&[
        ServiceDefinition {
            name: "products",
            url: Some("http://products"),
            type_defs: &products,
        },
        ServiceDefinition {
            name: "shipping",
            url: Some("http://shipping"),
            type_defs: &shipping,
        },
        ServiceDefinition {
            name: "reviews",
            url: Some("http://reviews"),
            type_defs: &reviews,
        },
    ])
    .unwrap();
    let sdl = supergraph.supergraph_sdl();

    assert_contains_graphql(
        sdl,
        r#"
        type Product @join__type(graph: PRODUCTS, key: "upc") @join__type(graph: SHIPPING, key: "upc") @join__type(graph: REVIEWS, key: "upc") {
          upc: String!
          name: String @join__field(graph: PRODUCTS, type: "String!") @join__field(graph: REVIEWS)
          weight: Int @join__field(graph: PRODUCTS) @join__field(graph: SHIPPING, external: true)
          shippingEstimate: Int @join__field(graph: SHIPPING, requires: "weight")
          reviews: [Review] @join__field(graph: REVIEWS, provides: "author { name }")
        }
        "#,
    );
    assert_contains_graphql(
        sdl,
        "type Query @join__type(graph: PRODUCTS) { topProducts: [Product!]! }",
    );
    assert_contains_graphql(sdl, "type Review @join__type(graph: REVIEWS)");
}

#[test]
fn serializes_the_supergraph_sdl() {
    let result = compose_services(&[ServiceDefinition {
        name: "a",
        url: Some("http://a"),
        type_defs: "type Query { a: Int }",
    }]);
    let output = CompositionOutput::from(&result);
    assert_json_snapshot!(output.errors, @"[]");
    assert!(output.supergraph_sdl.is_some_and(|sdl| sdl.contains(
        r#"A @join__graph(name: "a", url: "http://a")"#
    )));
}

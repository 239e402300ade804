use apollo_compiler::Schema;

pub(crate) mod directives;
pub(crate) mod emit;
pub(crate) mod extract;
pub mod state;

/// A subgraph as listed by the `join__Graph` enum of a supergraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupergraphGraph {
    pub enum_value: String,
    pub name: String,
    pub url: Option<String>,
}

/// The result of a successful composition.
#[derive(Debug, Clone)]
pub struct Supergraph {
    pub schema: Schema,
    pub sdl: String,
    graphs: Vec<SupergraphGraph>,
}

impl Supergraph {
    pub(crate) fn new(schema: Schema, graphs: Vec<SupergraphGraph>) -> Self {
        let sdl = schema.to_string();
        Self {
            schema,
            sdl,
            graphs,
        }
    }

    pub fn supergraph_sdl(&self) -> &str {
        &self.sdl
    }

    /// The composed subgraphs, in input order.
    pub fn graphs(&self) -> &[SupergraphGraph] {
        &self.graphs
    }
}

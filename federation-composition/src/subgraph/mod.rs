use std::fmt::Display;
use std::fmt::Formatter;

use apollo_compiler::Schema;

use crate::error::CompositionError;

pub mod identity;

pub use identity::GraphId;
pub use identity::SubgraphIdentities;

/// A subgraph as handed to composition: an authored name, an optional routing URL and its schema.
#[derive(Debug, Clone)]
pub struct Subgraph {
    pub name: String,
    pub url: Option<String>,
    pub schema: Schema,
}

impl Subgraph {
    pub fn new(name: &str, url: Option<&str>, schema: Schema) -> Self {
        Self {
            name: name.to_owned(),
            url: url.map(str::to_owned),
            schema,
        }
    }

    /// Parses subgraph SDL. Orphan extensions (`extend schema @link(...)`, `extend type Query`)
    /// are adopted, as subgraphs commonly only extend the root types.
    pub fn parse(name: &str, url: Option<&str>, sdl: &str) -> Result<Self, CompositionError> {
        let schema = Schema::builder()
            .adopt_orphan_extensions()
            .parse(sdl, name)
            .build()
            .map_err(|errors| CompositionError::from_parse_errors(name, errors))?;
        Ok(Self::new(name, url, schema))
    }
}

impl Display for Subgraph {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

//! Assigns every subgraph of a composition run a unique identifier.
//!
//! Display names are authored by users and only have to be unique when compared exactly. Names
//! that differ only by letter case (`Foo` and `foo`) are allowed, but would collide once turned
//! into `join__Graph` enum values, so their identifiers are derived from the shared lowercase form
//! and suffixed in encounter order (`FOO_1`, `FOO_2`). Suffixes already used by another subgraph
//! name are skipped.

use std::fmt::Display;
use std::fmt::Formatter;

use apollo_compiler::Name;
use indexmap::IndexMap;
use indexmap::IndexSet;
use itertools::Itertools;
use tracing::debug;

use crate::error::CompositionError;
use crate::subgraph::Subgraph;

/// The internal identifier of a subgraph, unique within a composition run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GraphId(String);

impl GraphId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The `join__Graph` enum value naming this subgraph.
    pub fn enum_value(&self) -> Result<Name, CompositionError> {
        let mut value: String = self
            .0
            .to_uppercase()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        if value.starts_with(|c: char| c.is_ascii_digit()) {
            value.insert(0, '_');
        }
        Name::new(&value).map_err(|_| CompositionError::InvalidSubgraphName {
            message: format!(
                "Subgraph \"{}\" cannot be represented as a join__Graph enum value",
                self.0
            ),
        })
    }
}

impl Display for GraphId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for GraphId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

#[derive(Debug, Clone)]
pub(crate) struct SubgraphIdentity {
    pub(crate) name: String,
    pub(crate) url: Option<String>,
    pub(crate) enum_value: Name,
}

/// The identifier of every subgraph of a run, in input order, along with its display name and URL.
#[derive(Debug, Clone, Default)]
pub struct SubgraphIdentities {
    graphs: IndexMap<GraphId, SubgraphIdentity>,
}

impl SubgraphIdentities {
    /// Resolves identifiers for the given subgraphs.
    ///
    /// Fails on the first exact duplicate name. URLs are never compared: several subgraphs may be
    /// served from the same endpoint.
    pub fn resolve(subgraphs: &[Subgraph]) -> Result<Self, CompositionError> {
        let mut seen: IndexSet<&str> = IndexSet::new();
        for subgraph in subgraphs {
            if !seen.insert(subgraph.name.as_str()) {
                return Err(CompositionError::DuplicateSubgraphName {
                    name: subgraph.name.clone(),
                });
            }
        }

        // Canonical (lowercased) form to the distinct exact names folding to it, in encounter
        // order.
        let mut groups: IndexMap<String, Vec<&str>> = IndexMap::new();
        for subgraph in subgraphs {
            groups
                .entry(subgraph.name.to_lowercase())
                .or_default()
                .push(subgraph.name.as_str());
        }

        // Enum values of names kept as they are. Generated suffixes skip them.
        let mut taken: IndexSet<Name> = groups
            .values()
            .filter(|names| names.len() == 1)
            .flatten()
            .filter_map(|name| GraphId((*name).to_owned()).enum_value().ok())
            .collect();
        let mut suffixed: IndexMap<&str, GraphId> = IndexMap::new();
        for (canonical, names) in groups.iter().filter(|(_, names)| names.len() > 1) {
            let mut suffix = 0;
            for name in names {
                let id = loop {
                    suffix += 1;
                    let candidate = GraphId(format!("{}_{suffix}", canonical.to_uppercase()));
                    match candidate.enum_value() {
                        Ok(value) if taken.contains(&value) => continue,
                        Ok(value) => {
                            taken.insert(value);
                            break candidate;
                        }
                        Err(_) => break candidate,
                    }
                };
                suffixed.insert(*name, id);
            }
        }

        let mut graphs = IndexMap::with_capacity(subgraphs.len());
        let mut enum_values: IndexMap<Name, GraphId> = IndexMap::new();
        for subgraph in subgraphs {
            let id = suffixed
                .get(subgraph.name.as_str())
                .cloned()
                .unwrap_or_else(|| GraphId(subgraph.name.clone()));
            let enum_value = id.enum_value()?;
            if let Some(other) = enum_values.insert(enum_value.clone(), id.clone()) {
                let other_name = graphs
                    .get(&other)
                    .map_or(other.as_str(), |graph: &SubgraphIdentity| graph.name.as_str());
                return Err(CompositionError::InvalidSubgraphName {
                    message: format!(
                        "Subgraphs \"{other_name}\" and \"{}\" would both be represented by the join__Graph enum value {enum_value}",
                        subgraph.name,
                    ),
                });
            }
            debug!(subgraph = %subgraph.name, graph_id = %id, "resolved subgraph identifier");
            graphs.insert(
                id,
                SubgraphIdentity {
                    name: subgraph.name.clone(),
                    url: subgraph.url.clone(),
                    enum_value,
                },
            );
        }
        Ok(Self { graphs })
    }

    pub fn len(&self) -> usize {
        self.graphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &GraphId> {
        self.graphs.keys()
    }

    /// Looks up the authored display name. Unknown identifiers are returned unchanged.
    pub fn name<'a>(&'a self, id: &'a GraphId) -> &'a str {
        self.graphs
            .get(id)
            .map_or(id.as_str(), |graph| graph.name.as_str())
    }

    pub fn url(&self, id: &GraphId) -> Option<&str> {
        self.graphs.get(id).and_then(|graph| graph.url.as_deref())
    }

    pub(crate) fn enum_value(&self, id: &GraphId) -> Option<&Name> {
        self.graphs.get(id).map(|graph| &graph.enum_value)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&GraphId, &SubgraphIdentity)> {
        self.graphs.iter()
    }

    /// Identifiers paired with their display names, e.g. for diagnostics.
    pub fn describe(&self) -> String {
        self.graphs
            .iter()
            .map(|(id, graph)| format!("{id}={}", graph.name))
            .join(", ")
    }
}

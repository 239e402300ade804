use std::fs;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use federation_composition::CompositionError;
use federation_composition::subgraph::Subgraph;
use indexmap::IndexMap;
use serde::Deserialize;

/// A `supergraph.yaml` file listing the subgraphs to compose, in composition order.
#[derive(Debug, Deserialize)]
pub(crate) struct SupergraphConfig {
    pub(crate) subgraphs: IndexMap<String, SubgraphConfig>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SubgraphConfig {
    #[serde(default)]
    pub(crate) routing_url: Option<String>,
    pub(crate) schema: SchemaSource,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SchemaSource {
    /// Relative paths are resolved against the directory of the config file.
    pub(crate) file: PathBuf,
}

impl SupergraphConfig {
    pub(crate) fn read(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_yaml::from_str(&contents)
            .with_context(|| format!("invalid supergraph config {}", path.display()))
    }

    /// Reads and parses every subgraph schema. Unreadable files fail the whole load, while
    /// invalid SDL is kept as a composition error of that subgraph.
    pub(crate) fn load_subgraphs(
        &self,
        config_path: &Path,
    ) -> anyhow::Result<Vec<Result<Subgraph, CompositionError>>> {
        let base = config_path.parent().unwrap_or_else(|| Path::new(""));
        self.subgraphs
            .iter()
            .map(|(name, subgraph)| {
                let path = base.join(&subgraph.schema.file);
                let sdl = fs::read_to_string(&path).with_context(|| {
                    format!("failed to read schema of subgraph {name} at {}", path.display())
                })?;
                Ok(Subgraph::parse(
                    name,
                    subgraph.routing_url.as_deref(),
                    &sdl,
                ))
            })
            .collect()
    }
}

use serde::Serialize;
use tracing::debug;
use tracing::instrument;

use crate::error::CompositionError;
use crate::error::ErrorOutput;
use crate::subgraph::Subgraph;
use crate::subgraph::SubgraphIdentities;
use crate::supergraph::Supergraph;
use crate::supergraph::SupergraphGraph;
use crate::supergraph::directives::compose_directives;
use crate::supergraph::emit::Emitter;
use crate::supergraph::extract::Extractor;
use crate::supergraph::state::SupergraphState;
use crate::validation::validate_supergraph;

/// Knobs of a composition run.
#[derive(Debug, Clone, Default)]
pub struct CompositionOptions {
    /// Names of validation rules to skip, e.g. `FieldArgumentDefaultsRule`.
    pub disabled_rules: Vec<String>,
}

pub fn compose(subgraphs: Vec<Subgraph>) -> Result<Supergraph, Vec<CompositionError>> {
    compose_with_options(subgraphs, &CompositionOptions::default())
}

/// Composes subgraphs into a supergraph.
///
/// Invalid subgraph names fail right away. Otherwise every validation rule runs over the merged
/// declarations, and all errors they report are returned together.
#[instrument(skip_all, fields(subgraphs = subgraphs.len()))]
pub fn compose_with_options(
    subgraphs: Vec<Subgraph>,
    options: &CompositionOptions,
) -> Result<Supergraph, Vec<CompositionError>> {
    let graphs = SubgraphIdentities::resolve(&subgraphs).map_err(|error| vec![error])?;
    debug!(graphs = %graphs.describe(), "resolved subgraph identifiers");

    let state = merge_declarations(&subgraphs, graphs);
    let errors = validate_supergraph(&state, &options.disabled_rules);
    if !errors.is_empty() {
        debug!(errors = errors.len(), "composition failed validation");
        return Err(errors);
    }

    let directives = compose_directives(&state);
    let schema = Emitter::new(&state, &directives).emit();
    let graphs = state
        .graphs
        .iter()
        .map(|(_, graph)| SupergraphGraph {
            enum_value: graph.enum_value.to_string(),
            name: graph.name.clone(),
            url: graph.url.clone(),
        })
        .collect();
    Ok(Supergraph::new(schema, graphs))
}

fn merge_declarations(subgraphs: &[Subgraph], graphs: SubgraphIdentities) -> SupergraphState {
    let ids: Vec<_> = graphs.ids().cloned().collect();
    let mut state = SupergraphState::new(graphs);
    for (graph, subgraph) in ids.into_iter().zip(subgraphs) {
        Extractor::new(&mut state, graph, &subgraph.schema).extract();
    }
    state
}

/// The serializable outcome of a composition: either the supergraph SDL or the errors.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositionOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supergraph_sdl: Option<String>,
    pub errors: Vec<ErrorOutput>,
}

impl From<&Result<Supergraph, Vec<CompositionError>>> for CompositionOutput {
    fn from(result: &Result<Supergraph, Vec<CompositionError>>) -> Self {
        match result {
            Ok(supergraph) => Self {
                supergraph_sdl: Some(supergraph.sdl.clone()),
                errors: Vec::new(),
            },
            Err(errors) => Self {
                supergraph_sdl: None,
                errors: errors.iter().map(ErrorOutput::from).collect(),
            },
        }
    }
}

impl From<Result<Supergraph, Vec<CompositionError>>> for CompositionOutput {
    fn from(result: Result<Supergraph, Vec<CompositionError>>) -> Self {
        Self::from(&result)
    }
}

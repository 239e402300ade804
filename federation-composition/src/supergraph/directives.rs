//! Decides which directive definitions survive into the supergraph, and where they can be used.

use apollo_compiler::Name;
use apollo_compiler::Node;
use apollo_compiler::ast::DirectiveDefinition;
use apollo_compiler::ast::DirectiveLocation;
use apollo_compiler::ast::InputValueDefinition;
use indexmap::IndexMap;
use indexmap::IndexSet;
use tracing::debug;

use crate::supergraph::state::DirectiveState;
use crate::supergraph::state::SupergraphState;
use crate::utils::types::DirectiveLocationExt;

/// A directive definition retained in the supergraph.
#[derive(Debug, Clone)]
pub(crate) struct ComposedDirective {
    pub(crate) definition: DirectiveDefinition,
    /// Opted into composition with `@composeDirective` by every subgraph. Only the type-system
    /// applications of these directives are copied to the supergraph.
    pub(crate) composed: bool,
}

impl ComposedDirective {
    /// Whether applications found at `location` in subgraphs are copied to the supergraph.
    pub(crate) fn copies_applications_at(&self, location: DirectiveLocation) -> bool {
        self.composed && self.definition.locations.contains(&location)
    }
}

/// Composes every directive declared by the subgraphs, in first-encounter order.
///
/// A directive is kept only if each subgraph declares it. Its locations are the intersection of
/// the declared ones, restricted to executable locations unless every subgraph composes it. A
/// composed directive also gains every type-system location it is applied at. Directives left
/// without any location are dropped.
pub(crate) fn compose_directives(state: &SupergraphState) -> IndexMap<Name, ComposedDirective> {
    let mut composed_directives = IndexMap::new();
    for directive in state.directives.values() {
        if directive.by_graph.len() != state.subgraph_count() {
            debug!(
                directive = %directive.name,
                "dropping directive not declared in every subgraph"
            );
            continue;
        }
        let Some(composed) = compose_directive(directive) else {
            debug!(
                directive = %directive.name,
                "dropping directive without a common location"
            );
            continue;
        };
        debug!(
            directive = %directive.name,
            locations = ?composed.definition.locations,
            composed = composed.composed,
            "retaining directive"
        );
        composed_directives.insert(directive.name.clone(), composed);
    }
    composed_directives
}

fn compose_directive(directive: &DirectiveState) -> Option<ComposedDirective> {
    let composed = directive.is_composed();
    let first = directive.by_graph.values().next()?;

    let mut locations: IndexSet<DirectiveLocation> = first
        .locations
        .iter()
        .filter(|location| composed || location.is_executable_location())
        .filter(|location| {
            directive
                .by_graph
                .values()
                .all(|in_graph| in_graph.locations.contains(*location))
        })
        .copied()
        .collect();
    if composed {
        for in_graph in directive.by_graph.values() {
            locations.extend(
                in_graph
                    .used_locations
                    .iter()
                    .filter(|location| !location.is_executable_location()),
            );
        }
    }
    if locations.is_empty() {
        return None;
    }

    // Arguments are kept when every subgraph declaring the directive declares them.
    let arguments = directive
        .arguments
        .values()
        .filter(|argument| argument.by_graph.len() == directive.by_graph.len())
        .map(|argument| {
            Node::new(InputValueDefinition {
                description: argument.description.clone(),
                name: argument.name.clone(),
                ty: Node::new(argument.ty.clone()),
                default_value: argument.default_value.clone(),
                directives: Default::default(),
            })
        })
        .collect();

    Some(ComposedDirective {
        definition: DirectiveDefinition {
            description: directive.description.clone(),
            name: directive.name.clone(),
            arguments,
            repeatable: directive
                .by_graph
                .values()
                .all(|in_graph| in_graph.repeatable),
            locations: locations.into_iter().collect(),
        },
        composed,
    })
}

use crate::error::CompositionError;
use crate::supergraph::state::ArgumentState;
use crate::supergraph::state::CompositeTypeState;
use crate::supergraph::state::FieldState;
use crate::validation::SupergraphVisitorMap;
use crate::validation::ValidationContext;
use crate::validation::rules::subgraph_names;

/// An argument required by a subgraph has to be declared by every subgraph declaring the field.
pub fn required_argument_missing_in_some_subgraph_rule(
    context: &ValidationContext,
) -> SupergraphVisitorMap<'_> {
    let check = move |parent: &CompositeTypeState, field: &FieldState, argument: &ArgumentState| {
        let required_in: Vec<_> = argument
            .by_graph
            .iter()
            .filter(|(_, in_graph)| in_graph.is_required())
            .map(|(graph, _)| graph)
            .collect();
        if required_in.is_empty() {
            return;
        }
        let missing_in: Vec<_> = field
            .by_graph
            .keys()
            .filter(|graph| !argument.by_graph.contains_key(*graph))
            .collect();
        if missing_in.is_empty() {
            return;
        }
        context.report_error(CompositionError::RequiredArgumentMissingInSomeSubgraph {
            message: format!(
                "Argument \"{}.{}({}:)\" is required in some subgraphs but does not appear in all subgraphs: it is required in {} but does not appear in {}",
                parent.name,
                field.name,
                argument.name,
                subgraph_names(context, required_in),
                subgraph_names(context, missing_in),
            ),
        });
    };
    SupergraphVisitorMap {
        object_type_field_arg: Some(Box::new(check)),
        interface_type_field_arg: Some(Box::new(check)),
        ..Default::default()
    }
}

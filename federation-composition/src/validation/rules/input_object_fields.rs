use crate::error::CompositionError;
use crate::supergraph::state::InputFieldState;
use crate::supergraph::state::InputObjectTypeState;
use crate::validation::SupergraphVisitorMap;
use crate::validation::ValidationContext;
use crate::validation::rules::subgraph_names;

/// Only fields shared by every subgraph declaring an input type make it to the supergraph: a
/// required field cannot be dropped, and at least one field has to remain.
pub fn input_object_fields_rule(context: &ValidationContext) -> SupergraphVisitorMap<'_> {
    SupergraphVisitorMap {
        input_object_type: Some(Box::new(move |input_type: &InputObjectTypeState| {
            let has_common_field = input_type
                .fields
                .values()
                .any(|field| field.by_graph.len() == input_type.by_graph.len());
            if has_common_field {
                return;
            }
            context.report_error(CompositionError::EmptyMergedInputType {
                message: format!(
                    "None of the fields of input object type \"{}\" are consistently defined in all the subgraphs defining that type. As only fields common to all subgraphs are merged, this would result in an empty type.",
                    input_type.name
                ),
            });
        })),
        input_object_type_field: Some(Box::new(
            move |input_type: &InputObjectTypeState, field: &InputFieldState| {
                let required_in: Vec<_> = field
                    .by_graph
                    .iter()
                    .filter(|(_, in_graph)| in_graph.is_required())
                    .map(|(graph, _)| graph)
                    .collect();
                if required_in.is_empty() {
                    return;
                }
                let missing_in: Vec<_> = input_type
                    .by_graph
                    .keys()
                    .filter(|graph| !field.by_graph.contains_key(*graph))
                    .collect();
                if missing_in.is_empty() {
                    return;
                }
                context.report_error(CompositionError::RequiredInputFieldMissingInSomeSubgraph {
                    message: format!(
                        "Input object field \"{}.{}\" is required in some subgraphs but does not appear in all subgraphs: it is required in {} but does not appear in {}",
                        input_type.name,
                        field.name,
                        subgraph_names(context, required_in),
                        subgraph_names(context, missing_in),
                    ),
                });
            },
        )),
        ..Default::default()
    }
}

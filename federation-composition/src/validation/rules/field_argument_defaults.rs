use crate::error::CompositionError;
use crate::supergraph::state::ArgumentState;
use crate::supergraph::state::FieldState;
use crate::supergraph::state::ObjectTypeState;
use crate::validation::SupergraphVisitorMap;
use crate::validation::ValidationContext;
use crate::validation::rules::describe_mismatch;
use crate::validation::rules::group_by_value;

/// Subgraphs declaring a default value for an argument have to agree on it.
pub fn field_argument_defaults_rule(context: &ValidationContext) -> SupergraphVisitorMap<'_> {
    SupergraphVisitorMap {
        object_type_field_arg: Some(Box::new(
            move |object_type: &ObjectTypeState, field: &FieldState, argument: &ArgumentState| {
                let groups = group_by_value(argument.by_graph.iter().filter_map(
                    |(graph, in_graph)| {
                        in_graph
                            .default_value
                            .as_ref()
                            .map(|value| (value.to_string(), graph))
                    },
                ));
                if groups.len() < 2 {
                    return;
                }
                context.report_error(CompositionError::FieldArgumentDefaultMismatch {
                    message: format!(
                        "Argument \"{}.{}({}:)\" has incompatible default values across subgraphs: it has {}",
                        object_type.name,
                        field.name,
                        argument.name,
                        describe_mismatch(context, &groups, |value| format!(
                            "default value {value}"
                        ))
                    ),
                });
            },
        )),
        ..Default::default()
    }
}

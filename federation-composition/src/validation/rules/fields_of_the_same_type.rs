use crate::error::CompositionError;
use crate::subgraph::GraphId;
use crate::supergraph::state::CompositeTypeState;
use crate::supergraph::state::FieldState;
use crate::supergraph::state::InputFieldState;
use crate::supergraph::state::InputObjectTypeState;
use crate::utils::types::normalize_input_type;
use crate::utils::types::normalize_output_type;
use crate::validation::SupergraphVisitorMap;
use crate::validation::ValidationContext;
use crate::validation::rules::describe_mismatch;
use crate::validation::rules::group_by_value;

/// A field has to have compatible types in every subgraph declaring it.
///
/// Output fields may be non-null where the supergraph field is nullable, input fields may be
/// nullable where the supergraph field is non-null.
pub fn fields_of_the_same_type_rule(context: &ValidationContext) -> SupergraphVisitorMap<'_> {
    let check_output_field = move |parent: &CompositeTypeState, field: &FieldState| {
        report_mismatch(
            context,
            &format!("{}.{}", parent.name, field.name),
            field.by_graph.iter().map(|(graph, in_graph)| {
                (normalize_output_type(&field.ty, &in_graph.ty).to_string(), graph)
            }),
        );
    };
    SupergraphVisitorMap {
        object_type_field: Some(Box::new(check_output_field)),
        interface_type_field: Some(Box::new(check_output_field)),
        input_object_type_field: Some(Box::new(
            move |parent: &InputObjectTypeState, field: &InputFieldState| {
                report_mismatch(
                    context,
                    &format!("{}.{}", parent.name, field.name),
                    field.by_graph.iter().map(|(graph, in_graph)| {
                        (normalize_input_type(&field.ty, &in_graph.ty).to_string(), graph)
                    }),
                );
            },
        )),
        ..Default::default()
    }
}

fn report_mismatch<'g>(
    context: &ValidationContext,
    coordinate: &str,
    types: impl IntoIterator<Item = (String, &'g GraphId)>,
) {
    let groups = group_by_value(types);
    if groups.len() < 2 {
        return;
    }
    context.report_error(CompositionError::FieldTypeMismatch {
        message: format!(
            "Type of field \"{coordinate}\" is incompatible across subgraphs: it has {}",
            describe_mismatch(context, &groups, |ty| format!("type \"{ty}\""))
        ),
    });
}

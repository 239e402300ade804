use indexmap::IndexMap;
use tracing::trace;

use crate::error::CompositionError;
use crate::subgraph::GraphId;
use crate::supergraph::state::ArgumentState;
use crate::supergraph::state::DirectiveState;
use crate::supergraph::state::FieldState;
use crate::supergraph::state::ObjectTypeState;
use crate::utils::types::normalize_input_type;
use crate::validation::SupergraphVisitorMap;
use crate::validation::ValidationContext;
use crate::validation::rules::describe_mismatch;
use crate::validation::rules::group_by_value;

/// Arguments of object fields and of directives have to be of the same type in every subgraph.
///
/// A nullable argument is compatible with the same argument declared non-null elsewhere. Directive
/// arguments are only checked for executable directives declared by every subgraph, the others
/// never reach the supergraph.
pub fn field_arguments_of_the_same_type_rule(
    context: &ValidationContext,
) -> SupergraphVisitorMap<'_> {
    SupergraphVisitorMap {
        object_type_field_arg: Some(Box::new(
            move |object_type: &ObjectTypeState, field: &FieldState, argument: &ArgumentState| {
                report_mismatch(
                    context,
                    &format!("{}.{}({}:)", object_type.name, field.name, argument.name),
                    argument,
                );
            },
        )),
        directive_arg: Some(Box::new(
            move |directive: &DirectiveState, argument: &ArgumentState| {
                if !directive.is_executable() {
                    return;
                }
                if directive.by_graph.len() != context.subgraph_count() {
                    trace!(
                        directive = %directive.name,
                        "skipping arguments of a directive missing from some subgraphs"
                    );
                    return;
                }
                report_mismatch(
                    context,
                    &format!("@{}({}:)", directive.name, argument.name),
                    argument,
                );
            },
        )),
        ..Default::default()
    }
}

/// Subgraphs grouped by their argument type, normalized against the supergraph type.
fn argument_type_groups(argument: &ArgumentState) -> IndexMap<String, Vec<&GraphId>> {
    group_by_value(argument.by_graph.iter().map(|(graph, in_graph)| {
        (
            normalize_input_type(&argument.ty, &in_graph.ty).to_string(),
            graph,
        )
    }))
}

fn report_mismatch(context: &ValidationContext, coordinate: &str, argument: &ArgumentState) {
    let groups = argument_type_groups(argument);
    if groups.len() < 2 {
        return;
    }
    context.report_error(CompositionError::FieldArgumentTypeMismatch {
        message: format!(
            "Type of argument \"{coordinate}\" is incompatible across subgraphs: it has {}",
            describe_mismatch(context, &groups, |ty| format!("type \"{ty}\""))
        ),
    });
}

use crate::error::CompositionError;
use crate::supergraph::state::NamedTypeState;
use crate::validation::SupergraphVisitorMap;
use crate::validation::ValidationContext;
use crate::validation::rules::describe_mismatch;
use crate::validation::rules::group_by_value;

/// A named type has to be of the same kind (object, interface, ...) in every subgraph.
pub fn types_of_the_same_kind_rule(context: &ValidationContext) -> SupergraphVisitorMap<'_> {
    SupergraphVisitorMap {
        named_type: Some(Box::new(move |named_type: &NamedTypeState| {
            let groups = group_by_value(
                named_type
                    .kinds
                    .iter()
                    .map(|(graph, kind)| (*kind, graph)),
            );
            if groups.len() < 2 {
                return;
            }
            context.report_error(CompositionError::TypeKindMismatch {
                message: format!(
                    "Type \"{}\" has mismatched kind: it is defined as {}",
                    named_type.name,
                    describe_mismatch(context, &groups, ToString::to_string)
                ),
            });
        })),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::validation::rules::test_helpers::messages;
    use crate::validation::rules::test_helpers::run_rule;

    #[test]
    fn reports_mismatched_kinds() {
        let errors = run_rule(
            types_of_the_same_kind_rule,
            &[
                ("a", "type Query { a: Int } type T { f: Int }"),
                ("b", "type Query { b: Int } interface T { f: Int }"),
                ("c", "type Query { c: Int } type T { f: Int }"),
            ],
        );
        assert_eq!(
            messages(&errors),
            vec![
                r#"Type "T" has mismatched kind: it is defined as Object Type in subgraphs "a", "c" but Interface Type in subgraph "b""#
            ]
        );
        assert_eq!(errors[0].code(), "TYPE_KIND_MISMATCH");
    }

    #[test]
    fn accepts_types_of_the_same_kind() {
        let errors = run_rule(
            types_of_the_same_kind_rule,
            &[
                ("a", "type Query { a: Int } enum E { A }"),
                ("b", "type Query { b: Int } enum E { B }"),
            ],
        );
        assert!(errors.is_empty());
    }
}

//! The registered supergraph validation rules.

use indexmap::IndexMap;

use crate::subgraph::GraphId;
use crate::utils::human_readable::human_readable_subgraph_names;
use crate::utils::human_readable::join_mismatched_groups;
use crate::validation::SupergraphVisitorMap;
use crate::validation::ValidationContext;

mod field_argument_defaults;
mod field_arguments_of_the_same_type;
mod fields_of_the_same_type;
mod input_object_fields;
mod required_argument_missing_in_some_subgraph;
mod types_of_the_same_kind;

pub use field_argument_defaults::field_argument_defaults_rule;
pub use field_arguments_of_the_same_type::field_arguments_of_the_same_type_rule;
pub use fields_of_the_same_type::fields_of_the_same_type_rule;
pub use input_object_fields::input_object_fields_rule;
pub use required_argument_missing_in_some_subgraph::required_argument_missing_in_some_subgraph_rule;
pub use types_of_the_same_kind::types_of_the_same_kind_rule;

/// Builds the handlers of a rule for a single validation pass.
pub type Rule = for<'a> fn(&'a ValidationContext) -> SupergraphVisitorMap<'a>;

/// Every rule, by name, in the order their handlers are invoked.
pub const SUPERGRAPH_RULES: &[(&str, Rule)] = &[
    ("TypesOfTheSameKindRule", types_of_the_same_kind_rule),
    ("FieldsOfTheSameTypeRule", fields_of_the_same_type_rule),
    (
        "FieldArgumentsOfTheSameTypeRule",
        field_arguments_of_the_same_type_rule,
    ),
    (
        "RequiredArgumentMissingInSomeSubgraphRule",
        required_argument_missing_in_some_subgraph_rule,
    ),
    ("FieldArgumentDefaultsRule", field_argument_defaults_rule),
    ("InputObjectFieldsRule", input_object_fields_rule),
];

/// Subgraphs grouped by the value they declare, in first-encounter order.
fn group_by_value<'g, V: Eq + std::hash::Hash>(
    declarations: impl IntoIterator<Item = (V, &'g GraphId)>,
) -> IndexMap<V, Vec<&'g GraphId>> {
    let mut groups: IndexMap<V, Vec<&'g GraphId>> = IndexMap::new();
    for (value, graph) in declarations {
        groups.entry(value).or_default().push(graph);
    }
    groups
}

/// Describes conflicting groups as `<label> "<value>" in subgraph "a" but <label> "<other>" in
/// subgraphs "b", "c"`.
fn describe_mismatch<V>(
    context: &ValidationContext,
    groups: &IndexMap<V, Vec<&GraphId>>,
    describe_value: impl Fn(&V) -> String,
) -> String {
    let groups: Vec<String> = groups
        .iter()
        .map(|(value, graphs)| {
            format!(
                "{} in {}",
                describe_value(value),
                human_readable_subgraph_names(
                    graphs.iter().map(|graph| context.graph_id_to_name(graph))
                )
            )
        })
        .collect();
    join_mismatched_groups(&groups)
}

fn subgraph_names<'a>(
    context: &'a ValidationContext,
    graphs: impl IntoIterator<Item = &'a GraphId>,
) -> String {
    human_readable_subgraph_names(graphs.into_iter().map(|graph| context.graph_id_to_name(graph)))
}

use std::sync::Mutex;
use std::sync::PoisonError;

use crate::error::CompositionError;
use crate::subgraph::GraphId;
use crate::subgraph::SubgraphIdentities;

/// Shared by every rule of a validation pass: subgraph lookups and the error sink.
#[derive(Debug)]
pub struct ValidationContext {
    graphs: SubgraphIdentities,
    errors: Mutex<Vec<CompositionError>>,
}

impl ValidationContext {
    pub fn new(graphs: SubgraphIdentities) -> Self {
        Self {
            graphs,
            errors: Mutex::new(Vec::new()),
        }
    }

    pub fn subgraph_count(&self) -> usize {
        self.graphs.len()
    }

    pub fn graph_id_to_name<'a>(&'a self, graph: &'a GraphId) -> &'a str {
        self.graphs.name(graph)
    }

    pub fn report_error(&self, error: CompositionError) {
        self.errors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(error);
    }

    /// Errors in the order they were reported.
    pub fn into_errors(self) -> Vec<CompositionError> {
        self.errors
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use apollo_compiler::Schema;

    use super::*;
    use crate::subgraph::Subgraph;

    #[test]
    fn collects_reported_errors() {
        let graphs = SubgraphIdentities::resolve(&[
            Subgraph::new("Foo", None, Schema::new()),
            Subgraph::new("foo", None, Schema::new()),
        ])
        .unwrap();
        let context = ValidationContext::new(graphs);
        assert_eq!(context.subgraph_count(), 2);
        assert_eq!(context.graph_id_to_name(&GraphId::from("FOO_2")), "foo");

        context.report_error(CompositionError::TypeKindMismatch {
            message: "first".to_owned(),
        });
        context.report_error(CompositionError::FieldTypeMismatch {
            message: "second".to_owned(),
        });
        let messages: Vec<String> = context
            .into_errors()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(messages, vec!["first", "second"]);
    }
}

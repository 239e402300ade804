//! Rule-based validation of the merged declaration model.
//!
//! Every rule turns a [`ValidationContext`] into a [`SupergraphVisitorMap`], a table of optional
//! handlers keyed by entity category. The model is then walked once, and each entity is handed to
//! the matching handler of every rule, in registration order.

use tracing::debug;
use tracing::trace;

use crate::error::CompositionError;
use crate::supergraph::state::ArgumentState;
use crate::supergraph::state::DirectiveState;
use crate::supergraph::state::EnumTypeState;
use crate::supergraph::state::EnumValueState;
use crate::supergraph::state::FieldState;
use crate::supergraph::state::InputFieldState;
use crate::supergraph::state::InputObjectTypeState;
use crate::supergraph::state::InterfaceTypeState;
use crate::supergraph::state::NamedTypeState;
use crate::supergraph::state::ObjectTypeState;
use crate::supergraph::state::ScalarTypeState;
use crate::supergraph::state::SupergraphState;
use crate::supergraph::state::UnionTypeState;

mod context;
pub mod rules;

pub use context::ValidationContext;
pub use rules::Rule;
pub use rules::SUPERGRAPH_RULES;

type Handler<'a, T> = Option<Box<dyn Fn(&T) + 'a>>;
type ChildHandler<'a, P, T> = Option<Box<dyn Fn(&P, &T) + 'a>>;
type GrandchildHandler<'a, P, C, T> = Option<Box<dyn Fn(&P, &C, &T) + 'a>>;

/// Handlers a rule registers, one optional slot per entity category.
#[derive(Default)]
pub struct SupergraphVisitorMap<'a> {
    pub named_type: Handler<'a, NamedTypeState>,
    pub object_type: Handler<'a, ObjectTypeState>,
    pub object_type_field: ChildHandler<'a, ObjectTypeState, FieldState>,
    pub object_type_field_arg: GrandchildHandler<'a, ObjectTypeState, FieldState, ArgumentState>,
    pub interface_type: Handler<'a, InterfaceTypeState>,
    pub interface_type_field: ChildHandler<'a, InterfaceTypeState, FieldState>,
    pub interface_type_field_arg:
        GrandchildHandler<'a, InterfaceTypeState, FieldState, ArgumentState>,
    pub input_object_type: Handler<'a, InputObjectTypeState>,
    pub input_object_type_field: ChildHandler<'a, InputObjectTypeState, InputFieldState>,
    pub enum_type: Handler<'a, EnumTypeState>,
    pub enum_type_value: ChildHandler<'a, EnumTypeState, EnumValueState>,
    pub union_type: Handler<'a, UnionTypeState>,
    pub scalar_type: Handler<'a, ScalarTypeState>,
    pub directive: Handler<'a, DirectiveState>,
    pub directive_arg: ChildHandler<'a, DirectiveState, ArgumentState>,
}

/// Walks the merged model once, invoking every visitor's handlers in order.
pub fn visit_supergraph(state: &SupergraphState, visitors: &[SupergraphVisitorMap<'_>]) {
    for named_type in state.named_types.values() {
        for handler in visitors.iter().filter_map(|v| v.named_type.as_ref()) {
            handler(named_type);
        }
    }

    for object_type in state.object_types.values() {
        trace!(type_name = %object_type.name, "visiting object type");
        for handler in visitors.iter().filter_map(|v| v.object_type.as_ref()) {
            handler(object_type);
        }
        for field in object_type.fields.values() {
            for handler in visitors.iter().filter_map(|v| v.object_type_field.as_ref()) {
                handler(object_type, field);
            }
            for argument in field.arguments.values() {
                for handler in visitors
                    .iter()
                    .filter_map(|v| v.object_type_field_arg.as_ref())
                {
                    handler(object_type, field, argument);
                }
            }
        }
    }

    for interface_type in state.interface_types.values() {
        trace!(type_name = %interface_type.name, "visiting interface type");
        for handler in visitors.iter().filter_map(|v| v.interface_type.as_ref()) {
            handler(interface_type);
        }
        for field in interface_type.fields.values() {
            for handler in visitors
                .iter()
                .filter_map(|v| v.interface_type_field.as_ref())
            {
                handler(interface_type, field);
            }
            for argument in field.arguments.values() {
                for handler in visitors
                    .iter()
                    .filter_map(|v| v.interface_type_field_arg.as_ref())
                {
                    handler(interface_type, field, argument);
                }
            }
        }
    }

    for input_object_type in state.input_object_types.values() {
        for handler in visitors.iter().filter_map(|v| v.input_object_type.as_ref()) {
            handler(input_object_type);
        }
        for field in input_object_type.fields.values() {
            for handler in visitors
                .iter()
                .filter_map(|v| v.input_object_type_field.as_ref())
            {
                handler(input_object_type, field);
            }
        }
    }

    for enum_type in state.enum_types.values() {
        for handler in visitors.iter().filter_map(|v| v.enum_type.as_ref()) {
            handler(enum_type);
        }
        for value in enum_type.values.values() {
            for handler in visitors.iter().filter_map(|v| v.enum_type_value.as_ref()) {
                handler(enum_type, value);
            }
        }
    }

    for union_type in state.union_types.values() {
        for handler in visitors.iter().filter_map(|v| v.union_type.as_ref()) {
            handler(union_type);
        }
    }

    for scalar_type in state.scalar_types.values() {
        for handler in visitors.iter().filter_map(|v| v.scalar_type.as_ref()) {
            handler(scalar_type);
        }
    }

    for directive in state.directives.values() {
        for handler in visitors.iter().filter_map(|v| v.directive.as_ref()) {
            handler(directive);
        }
        for argument in directive.arguments.values() {
            for handler in visitors.iter().filter_map(|v| v.directive_arg.as_ref()) {
                handler(directive, argument);
            }
        }
    }
}

/// Runs every registered rule that is not disabled over the merged model.
pub fn validate_supergraph(
    state: &SupergraphState,
    disabled_rules: &[String],
) -> Vec<CompositionError> {
    let context = ValidationContext::new(state.graphs.clone());
    {
        let visitors: Vec<SupergraphVisitorMap<'_>> = SUPERGRAPH_RULES
            .iter()
            .filter(|(name, _)| !disabled_rules.iter().any(|disabled| disabled == name))
            .map(|(_, rule)| rule(&context))
            .collect();
        debug!(rules = visitors.len(), "running supergraph validation rules");
        visit_supergraph(state, &visitors);
    }
    context.into_errors()
}

//! Fills the merged declaration model with the declarations of a single subgraph.

use apollo_compiler::Name;
use apollo_compiler::Node;
use apollo_compiler::Schema;
use apollo_compiler::ast::Directive;
use apollo_compiler::ast::DirectiveDefinition;
use apollo_compiler::ast::DirectiveLocation;
use apollo_compiler::ast::FieldDefinition;
use apollo_compiler::ast::InputValueDefinition;
use apollo_compiler::ast::Value;
use apollo_compiler::schema::Component;
use apollo_compiler::schema::EnumType;
use apollo_compiler::schema::ExtendedType;
use apollo_compiler::schema::InputObjectType;
use apollo_compiler::schema::ScalarType;
use apollo_compiler::schema::UnionType;
use indexmap::IndexMap;
use indexmap::IndexSet;
use tracing::trace;

use crate::subgraph::GraphId;
use crate::supergraph::state::CompositeTypeInGraph;
use crate::supergraph::state::CompositeTypeState;
use crate::supergraph::state::DirectiveInGraph;
use crate::supergraph::state::DirectiveState;
use crate::supergraph::state::EnumTypeState;
use crate::supergraph::state::EnumValueState;
use crate::supergraph::state::FieldInGraph;
use crate::supergraph::state::FieldState;
use crate::supergraph::state::InputObjectTypeState;
use crate::supergraph::state::InputValueInGraph;
use crate::supergraph::state::InputValueState;
use crate::supergraph::state::KeyInGraph;
use crate::supergraph::state::NamedTypeState;
use crate::supergraph::state::ScalarTypeState;
use crate::supergraph::state::SupergraphState;
use crate::supergraph::state::TypeKind;
use crate::supergraph::state::UnionTypeState;
use crate::supergraph::state::elect_input_type;
use crate::supergraph::state::elect_output_type;
use crate::supergraph::state::merge_description;

/// Directives of the federation, link and join specs. They drive composition but are never
/// treated as user directives.
const FEDERATION_DIRECTIVES: [&str; 19] = [
    "key",
    "requires",
    "provides",
    "external",
    "shareable",
    "extends",
    "override",
    "inaccessible",
    "tag",
    "link",
    "composeDirective",
    "interfaceObject",
    "authenticated",
    "requiresScopes",
    "policy",
    "context",
    "fromContext",
    "cost",
    "listSize",
];

const BUILT_IN_DIRECTIVES: [&str; 7] = [
    "skip",
    "include",
    "deprecated",
    "specifiedBy",
    "defer",
    "stream",
    "oneOf",
];

const FEDERATION_TYPES: [&str; 6] = [
    "_Any",
    "_Entity",
    "_Service",
    "FieldSet",
    "_FieldSet",
    "ContextFieldValue",
];

const SPEC_PREFIXES: [&str; 3] = ["federation__", "link__", "join__"];

fn is_mergeable_type(type_name: &str) -> bool {
    !FEDERATION_TYPES.contains(&type_name)
        && !SPEC_PREFIXES
            .iter()
            .any(|prefix| type_name.starts_with(prefix))
}

fn is_user_directive(name: &str) -> bool {
    !FEDERATION_DIRECTIVES.contains(&name)
        && !BUILT_IN_DIRECTIVES.contains(&name)
        && !SPEC_PREFIXES.iter().any(|prefix| name.starts_with(prefix))
}

/// Matches `@<name>` and its namespaced form `@federation__<name>`.
fn is_federation_directive(directive: &Directive, name: &str) -> bool {
    directive.name == name
        || directive
            .name
            .strip_prefix("federation__")
            .is_some_and(|unprefixed| unprefixed == name)
}

fn string_argument<'a>(directive: &'a Directive, name: &str) -> Option<&'a str> {
    directive
        .arguments
        .iter()
        .find(|argument| argument.name == name)
        .and_then(|argument| match argument.value.as_ref() {
            Value::String(value) => Some(value.as_str()),
            _ => None,
        })
}

fn bool_argument(directive: &Directive, name: &str) -> Option<bool> {
    directive
        .arguments
        .iter()
        .find(|argument| argument.name == name)
        .and_then(|argument| match argument.value.as_ref() {
            Value::Boolean(value) => Some(*value),
            _ => None,
        })
}

fn components<'a>(
    directives: impl Iterator<Item = &'a Component<Directive>>,
) -> impl Iterator<Item = &'a Node<Directive>> {
    directives.map(|component| &component.node)
}

pub(crate) struct Extractor<'a> {
    state: &'a mut SupergraphState,
    graph: GraphId,
    schema: &'a Schema,
}

impl<'a> Extractor<'a> {
    pub(crate) fn new(state: &'a mut SupergraphState, graph: GraphId, schema: &'a Schema) -> Self {
        Self {
            state,
            graph,
            schema,
        }
    }

    pub(crate) fn extract(mut self) {
        let schema = self.schema;
        self.extract_root_types();

        // Definitions first, so applications found on types can be attributed to them.
        for (name, definition) in &schema.directive_definitions {
            if is_user_directive(name) {
                self.extract_directive_definition(definition);
            }
        }
        self.mark_composed_directives();

        for (name, ty) in &schema.types {
            if ty.is_built_in() || !is_mergeable_type(name) {
                continue;
            }
            trace!(graph = %self.graph, type_name = %name, "extracting type");
            match ty {
                ExtendedType::Object(object) => self.extract_composite_type(
                    TypeKind::Object,
                    name,
                    &object.description,
                    object.implements_interfaces.iter().map(|i| &i.name),
                    components(object.directives.iter()),
                    object.fields.values(),
                ),
                ExtendedType::Interface(interface) => self.extract_composite_type(
                    TypeKind::Interface,
                    name,
                    &interface.description,
                    interface.implements_interfaces.iter().map(|i| &i.name),
                    components(interface.directives.iter()),
                    interface.fields.values(),
                ),
                ExtendedType::InputObject(input) => self.extract_input_object_type(name, input),
                ExtendedType::Enum(enum_type) => self.extract_enum_type(name, enum_type),
                ExtendedType::Union(union_type) => self.extract_union_type(name, union_type),
                ExtendedType::Scalar(scalar) => self.extract_scalar_type(name, scalar),
            }
        }
    }

    fn extract_root_types(&mut self) {
        let definition = &self.schema.schema_definition;
        let roots = &mut self.state.root_types;
        for (slot, local, default_name) in [
            (&mut roots.query, &definition.query, "Query"),
            (&mut roots.mutation, &definition.mutation, "Mutation"),
            (&mut roots.subscription, &definition.subscription, "Subscription"),
        ] {
            if slot.is_some() {
                continue;
            }
            if let Some(local) = local {
                *slot = Some(local.name.clone());
            } else if self.schema.types.contains_key(default_name) {
                *slot = Name::new(default_name).ok();
            }
        }
    }

    /// Directive names listed by `@composeDirective(name: "@foo")` on the schema definition.
    fn extract_composed_directive_names(&self) -> IndexSet<Name> {
        components(self.schema.schema_definition.directives.iter())
            .filter(|directive| is_federation_directive(directive, "composeDirective"))
            .filter_map(|directive| string_argument(directive, "name"))
            .filter_map(|name| Name::new(name.trim_start_matches('@')).ok())
            .collect()
    }

    fn mark_composed_directives(&mut self) {
        let composed = self.extract_composed_directive_names();
        for name in composed {
            if let Some(directive) = self
                .state
                .directives
                .get_mut(&name)
                .and_then(|directive| directive.by_graph.get_mut(&self.graph))
            {
                directive.compose = true;
            }
        }
    }

    fn extract_directive_definition(&mut self, definition: &Node<DirectiveDefinition>) {
        let state = self
            .state
            .directives
            .entry(definition.name.clone())
            .or_insert_with(|| DirectiveState {
                name: definition.name.clone(),
                description: None,
                by_graph: Default::default(),
                arguments: Default::default(),
            });
        merge_description(&mut state.description, &definition.description);
        state.by_graph.insert(
            self.graph.clone(),
            DirectiveInGraph {
                locations: definition.locations.iter().copied().collect(),
                repeatable: definition.repeatable,
                compose: false,
                used_locations: Default::default(),
            },
        );
        for argument in &definition.arguments {
            extract_input_value(&mut state.arguments, &self.graph, argument, Vec::new());
        }
    }

    fn record_type(&mut self, name: &Name, kind: TypeKind) {
        self.state
            .named_types
            .entry(name.clone())
            .or_insert_with(|| NamedTypeState {
                name: name.clone(),
                kinds: Default::default(),
            })
            .kinds
            .insert(self.graph.clone(), kind);
    }

    /// Keeps user directives applied at a type-system location, recording the usage on the
    /// directive's declaration in this subgraph.
    fn applied_directives<'d>(
        &mut self,
        directives: impl Iterator<Item = &'d Node<Directive>>,
        location: DirectiveLocation,
    ) -> Vec<Node<Directive>> {
        let mut applied = Vec::new();
        for directive in directives {
            if !is_user_directive(&directive.name) {
                continue;
            }
            let Some(declaration) = self
                .state
                .directives
                .get_mut(&directive.name)
                .and_then(|state| state.by_graph.get_mut(&self.graph))
            else {
                continue;
            };
            declaration.used_locations.insert(location);
            applied.push(directive.clone());
        }
        applied
    }

    fn extract_composite_type<'d>(
        &mut self,
        kind: TypeKind,
        name: &Name,
        description: &Option<Node<str>>,
        interfaces: impl Iterator<Item = &'d Name>,
        directives: impl Iterator<Item = &'d Node<Directive>>,
        fields: impl Iterator<Item = &'d Component<FieldDefinition>>,
    ) {
        self.record_type(name, kind);
        let location = match kind {
            TypeKind::Interface => DirectiveLocation::Interface,
            _ => DirectiveLocation::Object,
        };
        let directives: Vec<&Node<Directive>> = directives.collect();
        let keys = directives
            .iter()
            .filter(|directive| is_federation_directive(directive, "key"))
            .filter_map(|directive| {
                string_argument(directive, "fields").map(|fields| KeyInGraph {
                    fields: fields.to_owned(),
                    resolvable: bool_argument(directive, "resolvable").unwrap_or(true),
                })
            })
            .collect();
        let in_graph = CompositeTypeInGraph {
            interfaces: interfaces.cloned().collect(),
            keys,
            directives: self.applied_directives(directives.into_iter(), location),
        };

        let mut extracted_fields = Vec::new();
        for field in fields {
            if field.name == "_service" || field.name == "_entities" {
                continue;
            }
            let field_directives =
                self.applied_directives(field.directives.iter(), DirectiveLocation::FieldDefinition);
            let argument_directives: Vec<_> = field
                .arguments
                .iter()
                .map(|argument| {
                    self.applied_directives(
                        argument.directives.iter(),
                        DirectiveLocation::ArgumentDefinition,
                    )
                })
                .collect();
            extracted_fields.push((field, field_directives, argument_directives));
        }

        let types = match kind {
            TypeKind::Interface => &mut self.state.interface_types,
            _ => &mut self.state.object_types,
        };
        let state = types
            .entry(name.clone())
            .or_insert_with(|| CompositeTypeState {
                name: name.clone(),
                description: None,
                by_graph: Default::default(),
                fields: Default::default(),
            });
        merge_description(&mut state.description, description);
        state.by_graph.insert(self.graph.clone(), in_graph);

        for (field, directives, argument_directives) in extracted_fields {
            let field_state = state
                .fields
                .entry(field.name.clone())
                .or_insert_with(|| FieldState {
                    name: field.name.clone(),
                    ty: field.ty.clone(),
                    description: None,
                    by_graph: Default::default(),
                    arguments: Default::default(),
                });
            field_state.ty = elect_output_type(&field_state.ty, &field.ty);
            merge_description(&mut field_state.description, &field.description);
            field_state.by_graph.insert(
                self.graph.clone(),
                FieldInGraph {
                    ty: field.ty.clone(),
                    external: field
                        .directives
                        .iter()
                        .any(|directive| is_federation_directive(directive, "external")),
                    requires: field
                        .directives
                        .iter()
                        .find(|directive| is_federation_directive(directive, "requires"))
                        .and_then(|directive| string_argument(directive, "fields"))
                        .map(str::to_owned),
                    provides: field
                        .directives
                        .iter()
                        .find(|directive| is_federation_directive(directive, "provides"))
                        .and_then(|directive| string_argument(directive, "fields"))
                        .map(str::to_owned),
                    directives,
                },
            );
            for (argument, directives) in field.arguments.iter().zip(argument_directives) {
                extract_input_value(&mut field_state.arguments, &self.graph, argument, directives);
            }
        }
    }

    fn extract_input_object_type(&mut self, name: &Name, input: &Node<InputObjectType>) {
        self.record_type(name, TypeKind::InputObject);
        let directives =
            self.applied_directives(components(input.directives.iter()), DirectiveLocation::InputObject);
        let field_directives: Vec<_> = input
            .fields
            .values()
            .map(|field| {
                self.applied_directives(
                    field.directives.iter(),
                    DirectiveLocation::InputFieldDefinition,
                )
            })
            .collect();

        let state = self
            .state
            .input_object_types
            .entry(name.clone())
            .or_insert_with(|| InputObjectTypeState {
                name: name.clone(),
                description: None,
                by_graph: Default::default(),
                fields: Default::default(),
            });
        merge_description(&mut state.description, &input.description);
        state.by_graph.insert(self.graph.clone(), directives);
        for (field, directives) in input.fields.values().zip(field_directives) {
            extract_input_value(&mut state.fields, &self.graph, field, directives);
        }
    }

    fn extract_enum_type(&mut self, name: &Name, enum_type: &Node<EnumType>) {
        self.record_type(name, TypeKind::Enum);
        let directives =
            self.applied_directives(components(enum_type.directives.iter()), DirectiveLocation::Enum);
        let value_directives: Vec<_> = enum_type
            .values
            .values()
            .map(|value| {
                self.applied_directives(value.directives.iter(), DirectiveLocation::EnumValue)
            })
            .collect();

        let state = self
            .state
            .enum_types
            .entry(name.clone())
            .or_insert_with(|| EnumTypeState {
                name: name.clone(),
                description: None,
                by_graph: Default::default(),
                values: Default::default(),
            });
        merge_description(&mut state.description, &enum_type.description);
        state.by_graph.insert(self.graph.clone(), directives);
        for (value, directives) in enum_type.values.values().zip(value_directives) {
            let value_state = state
                .values
                .entry(value.value.clone())
                .or_insert_with(|| EnumValueState {
                    name: value.value.clone(),
                    description: None,
                    by_graph: Default::default(),
                });
            merge_description(&mut value_state.description, &value.description);
            value_state.by_graph.insert(self.graph.clone(), directives);
        }
    }

    fn extract_union_type(&mut self, name: &Name, union_type: &Node<UnionType>) {
        self.record_type(name, TypeKind::Union);
        let directives =
            self.applied_directives(components(union_type.directives.iter()), DirectiveLocation::Union);
        let state = self
            .state
            .union_types
            .entry(name.clone())
            .or_insert_with(|| UnionTypeState {
                name: name.clone(),
                description: None,
                by_graph: Default::default(),
                members: Default::default(),
            });
        merge_description(&mut state.description, &union_type.description);
        state.by_graph.insert(self.graph.clone(), directives);
        for member in &union_type.members {
            state
                .members
                .entry(member.name.clone())
                .or_default()
                .insert(self.graph.clone());
        }
    }

    fn extract_scalar_type(&mut self, name: &Name, scalar: &Node<ScalarType>) {
        self.record_type(name, TypeKind::Scalar);
        let directives =
            self.applied_directives(components(scalar.directives.iter()), DirectiveLocation::Scalar);
        let state = self
            .state
            .scalar_types
            .entry(name.clone())
            .or_insert_with(|| ScalarTypeState {
                name: name.clone(),
                description: None,
                by_graph: Default::default(),
            });
        merge_description(&mut state.description, &scalar.description);
        state.by_graph.insert(self.graph.clone(), directives);
    }
}

fn extract_input_value(
    values: &mut IndexMap<Name, InputValueState>,
    graph: &GraphId,
    definition: &InputValueDefinition,
    directives: Vec<Node<Directive>>,
) {
    let state = values
        .entry(definition.name.clone())
        .or_insert_with(|| InputValueState {
            name: definition.name.clone(),
            ty: (*definition.ty).clone(),
            default_value: None,
            description: None,
            by_graph: Default::default(),
        });
    state.ty = elect_input_type(&state.ty, &definition.ty);
    if state.default_value.is_none() {
        state.default_value.clone_from(&definition.default_value);
    }
    merge_description(&mut state.description, &definition.description);
    state.by_graph.insert(
        graph.clone(),
        InputValueInGraph {
            ty: (*definition.ty).clone(),
            default_value: definition.default_value.clone(),
            directives,
        },
    );
}

//! Builds the supergraph schema out of the validated merged declaration model.

use apollo_compiler::Name;
use apollo_compiler::Node;
use apollo_compiler::Schema;
use apollo_compiler::ast::Directive;
use apollo_compiler::ast::DirectiveList;
use apollo_compiler::ast::DirectiveLocation;
use apollo_compiler::ast::EnumValueDefinition;
use apollo_compiler::ast::FieldDefinition;
use apollo_compiler::ast::InputValueDefinition;
use apollo_compiler::schema::Component;
use apollo_compiler::schema::ComponentName;
use apollo_compiler::schema::EnumType;
use apollo_compiler::schema::ExtendedType;
use apollo_compiler::schema::InputObjectType;
use apollo_compiler::schema::InterfaceType;
use apollo_compiler::schema::ObjectType;
use apollo_compiler::schema::ScalarType;
use apollo_compiler::schema::UnionType;
use indexmap::IndexMap;
use tracing::trace;

use crate::subgraph::GraphId;
use crate::supergraph::directives::ComposedDirective;
use crate::supergraph::state::CompositeTypeState;
use crate::supergraph::state::EnumTypeState;
use crate::supergraph::state::FieldState;
use crate::supergraph::state::InputObjectTypeState;
use crate::supergraph::state::InputValueState;
use crate::supergraph::state::ScalarTypeState;
use crate::supergraph::state::SupergraphState;
use crate::supergraph::state::TypeKind;
use crate::supergraph::state::UnionTypeState;

mod spec;

use spec::JoinField;

pub(crate) struct Emitter<'a> {
    state: &'a SupergraphState,
    directives: &'a IndexMap<Name, ComposedDirective>,
}

impl<'a> Emitter<'a> {
    pub(crate) fn new(
        state: &'a SupergraphState,
        directives: &'a IndexMap<Name, ComposedDirective>,
    ) -> Self {
        Self { state, directives }
    }

    pub(crate) fn emit(&self) -> Schema {
        let mut supergraph = Schema::new();
        spec::add_core_feature_link(&mut supergraph);
        spec::add_core_feature_join(&mut supergraph, &self.state.graphs);
        self.emit_root_types(&mut supergraph);

        for (name, directive) in self.directives {
            supergraph
                .directive_definitions
                .insert(name.clone(), Node::new(directive.definition.clone()));
        }

        for (name, named_type) in &self.state.named_types {
            let Some(kind) = named_type.kinds.values().next() else {
                continue;
            };
            trace!(type_name = %name, %kind, "emitting type");
            let emitted = match kind {
                TypeKind::Object => self
                    .state
                    .object_types
                    .get(name)
                    .map(|ty| ExtendedType::Object(Node::new(self.object_type(ty)))),
                TypeKind::Interface => self
                    .state
                    .interface_types
                    .get(name)
                    .map(|ty| ExtendedType::Interface(Node::new(self.interface_type(ty)))),
                TypeKind::InputObject => self
                    .state
                    .input_object_types
                    .get(name)
                    .map(|ty| ExtendedType::InputObject(Node::new(self.input_object_type(ty)))),
                TypeKind::Enum => self
                    .state
                    .enum_types
                    .get(name)
                    .map(|ty| ExtendedType::Enum(Node::new(self.enum_type(ty)))),
                TypeKind::Union => self
                    .state
                    .union_types
                    .get(name)
                    .map(|ty| ExtendedType::Union(Node::new(self.union_type(ty)))),
                TypeKind::Scalar => self
                    .state
                    .scalar_types
                    .get(name)
                    .map(|ty| ExtendedType::Scalar(Node::new(self.scalar_type(ty)))),
            };
            if let Some(emitted) = emitted {
                supergraph.types.insert(name.clone(), emitted);
            }
        }
        supergraph
    }

    fn emit_root_types(&self, supergraph: &mut Schema) {
        let roots = &self.state.root_types;
        let definition = supergraph.schema_definition.make_mut();
        for (slot, root) in [
            (&mut definition.query, &roots.query),
            (&mut definition.mutation, &roots.mutation),
            (&mut definition.subscription, &roots.subscription),
        ] {
            *slot = root
                .as_ref()
                .filter(|name| self.state.object_types.contains_key(*name))
                .map(|name| ComponentName::from(name.clone()));
        }
    }

    fn enum_value(&self, graph: &GraphId) -> Option<&Name> {
        self.state.graphs.enum_value(graph)
    }

    /// Applications of composed directives valid at `location`, without duplicates.
    fn copied_directives<'d>(
        &self,
        applications: impl IntoIterator<Item = &'d Vec<Node<Directive>>>,
        location: DirectiveLocation,
    ) -> Vec<Node<Directive>> {
        let mut copied: Vec<Node<Directive>> = Vec::new();
        for directive in applications.into_iter().flatten() {
            if !copied.contains(directive)
                && self
                    .directives
                    .get(&directive.name)
                    .is_some_and(|composed| composed.copies_applications_at(location))
            {
                copied.push(directive.clone());
            }
        }
        copied
    }

    fn type_directives<'d>(
        &self,
        applications: impl IntoIterator<Item = &'d Vec<Node<Directive>>>,
        location: DirectiveLocation,
        join_directives: impl IntoIterator<Item = Directive>,
    ) -> apollo_compiler::schema::DirectiveList {
        let mut directives = apollo_compiler::schema::DirectiveList::default();
        for directive in self.copied_directives(applications, location) {
            directives.push(Component::new((*directive).clone()));
        }
        for directive in join_directives {
            directives.push(Component::new(directive));
        }
        directives
    }

    /// `@join__type` for every declaring graph, `@join__implements` for every interface it
    /// implements there.
    fn composite_type_join_directives(&self, ty: &CompositeTypeState) -> Vec<Directive> {
        let mut join_directives = Vec::new();
        for (graph, in_graph) in &ty.by_graph {
            let Some(enum_value) = self.enum_value(graph) else {
                continue;
            };
            if in_graph.keys.is_empty() {
                join_directives.push(spec::join_type_directive(enum_value, None));
            }
            for key in &in_graph.keys {
                join_directives.push(spec::join_type_directive(enum_value, Some(key)));
            }
        }
        for (graph, in_graph) in &ty.by_graph {
            let Some(enum_value) = self.enum_value(graph) else {
                continue;
            };
            for interface in &in_graph.interfaces {
                join_directives.push(spec::join_implements_directive(enum_value, interface));
            }
        }
        join_directives
    }

    fn object_type(&self, ty: &CompositeTypeState) -> ObjectType {
        ObjectType {
            description: ty.description.clone(),
            name: ty.name.clone(),
            implements_interfaces: implemented_interfaces(ty),
            directives: self.type_directives(
                ty.by_graph.values().map(|in_graph| &in_graph.directives),
                DirectiveLocation::Object,
                self.composite_type_join_directives(ty),
            ),
            fields: self.fields(ty),
        }
    }

    fn interface_type(&self, ty: &CompositeTypeState) -> InterfaceType {
        InterfaceType {
            description: ty.description.clone(),
            name: ty.name.clone(),
            implements_interfaces: implemented_interfaces(ty),
            directives: self.type_directives(
                ty.by_graph.values().map(|in_graph| &in_graph.directives),
                DirectiveLocation::Interface,
                self.composite_type_join_directives(ty),
            ),
            fields: self.fields(ty),
        }
    }

    fn fields(
        &self,
        ty: &CompositeTypeState,
    ) -> apollo_compiler::collections::IndexMap<Name, Component<FieldDefinition>> {
        ty.fields
            .values()
            .map(|field| {
                (
                    field.name.clone(),
                    Component::new(self.field(field, ty.by_graph.len())),
                )
            })
            .collect()
    }

    fn field(&self, field: &FieldState, parent_graph_count: usize) -> FieldDefinition {
        let mut directives = self.copied_directives(
            field.by_graph.values().map(|in_graph| &in_graph.directives),
            DirectiveLocation::FieldDefinition,
        );

        let needs_join_field = field.by_graph.len() != parent_graph_count
            || field.by_graph.values().any(|in_graph| {
                in_graph.external
                    || in_graph.requires.is_some()
                    || in_graph.provides.is_some()
                    || in_graph.ty != field.ty
            });
        if needs_join_field {
            for (graph, in_graph) in &field.by_graph {
                let Some(enum_value) = self.enum_value(graph) else {
                    continue;
                };
                directives.push(Node::new(spec::join_field_directive(
                    enum_value,
                    JoinField {
                        requires: in_graph.requires.as_deref(),
                        provides: in_graph.provides.as_deref(),
                        ty: (in_graph.ty != field.ty).then_some(&in_graph.ty),
                        external: in_graph.external,
                    },
                )));
            }
        }

        // Arguments are kept when every subgraph declaring the field declares them.
        let arguments = field
            .arguments
            .values()
            .filter(|argument| argument.by_graph.len() == field.by_graph.len())
            .map(|argument| {
                self.input_value(
                    argument,
                    argument.by_graph.values().map(|in_graph| &in_graph.directives),
                    DirectiveLocation::ArgumentDefinition,
                )
            })
            .collect();

        FieldDefinition {
            description: field.description.clone(),
            name: field.name.clone(),
            arguments,
            ty: field.ty.clone(),
            directives: DirectiveList(directives),
        }
    }

    fn input_value<'d>(
        &self,
        value: &InputValueState,
        applications: impl IntoIterator<Item = &'d Vec<Node<Directive>>>,
        location: DirectiveLocation,
    ) -> Node<InputValueDefinition> {
        Node::new(InputValueDefinition {
            description: value.description.clone(),
            name: value.name.clone(),
            ty: Node::new(value.ty.clone()),
            default_value: value.default_value.clone(),
            directives: DirectiveList(self.copied_directives(applications, location)),
        })
    }

    fn join_type_directives<'d>(
        &self,
        graphs: impl IntoIterator<Item = &'d GraphId>,
    ) -> Vec<Directive> {
        graphs
            .into_iter()
            .filter_map(|graph| self.enum_value(graph))
            .map(|enum_value| spec::join_type_directive(enum_value, None))
            .collect()
    }

    /// Only fields declared by every subgraph declaring the input type are kept.
    fn input_object_type(&self, ty: &InputObjectTypeState) -> InputObjectType {
        let fields = ty
            .fields
            .values()
            .filter(|field| field.by_graph.len() == ty.by_graph.len())
            .map(|field| {
                let definition = self.input_value(
                    field,
                    field.by_graph.values().map(|in_graph| &in_graph.directives),
                    DirectiveLocation::InputFieldDefinition,
                );
                (field.name.clone(), Component::new((*definition).clone()))
            })
            .collect();
        InputObjectType {
            description: ty.description.clone(),
            name: ty.name.clone(),
            directives: self.type_directives(
                ty.by_graph.values(),
                DirectiveLocation::InputObject,
                self.join_type_directives(ty.by_graph.keys()),
            ),
            fields,
        }
    }

    fn enum_type(&self, ty: &EnumTypeState) -> EnumType {
        let values = ty
            .values
            .values()
            .map(|value| {
                let mut directives = self
                    .copied_directives(value.by_graph.values(), DirectiveLocation::EnumValue);
                directives.extend(
                    value
                        .by_graph
                        .keys()
                        .filter_map(|graph| self.enum_value(graph))
                        .map(|enum_value| Node::new(spec::join_enum_value_directive(enum_value))),
                );
                (
                    value.name.clone(),
                    Component::new(EnumValueDefinition {
                        description: value.description.clone(),
                        value: value.name.clone(),
                        directives: DirectiveList(directives),
                    }),
                )
            })
            .collect();
        EnumType {
            description: ty.description.clone(),
            name: ty.name.clone(),
            directives: self.type_directives(
                ty.by_graph.values(),
                DirectiveLocation::Enum,
                self.join_type_directives(ty.by_graph.keys()),
            ),
            values,
        }
    }

    fn union_type(&self, ty: &UnionTypeState) -> UnionType {
        let mut join_directives = self.join_type_directives(ty.by_graph.keys());
        for graph in ty.by_graph.keys() {
            let Some(enum_value) = self.enum_value(graph) else {
                continue;
            };
            for (member, member_graphs) in &ty.members {
                if member_graphs.contains(graph) {
                    join_directives.push(spec::join_union_member_directive(enum_value, member));
                }
            }
        }
        UnionType {
            description: ty.description.clone(),
            name: ty.name.clone(),
            directives: self.type_directives(
                ty.by_graph.values(),
                DirectiveLocation::Union,
                join_directives,
            ),
            members: ty
                .members
                .keys()
                .map(|member| ComponentName::from(member.clone()))
                .collect(),
        }
    }

    fn scalar_type(&self, ty: &ScalarTypeState) -> ScalarType {
        ScalarType {
            description: ty.description.clone(),
            name: ty.name.clone(),
            directives: self.type_directives(
                ty.by_graph.values(),
                DirectiveLocation::Scalar,
                self.join_type_directives(ty.by_graph.keys()),
            ),
        }
    }
}

fn implemented_interfaces(ty: &CompositeTypeState) -> apollo_compiler::collections::IndexSet<ComponentName> {
    ty.by_graph
        .values()
        .flat_map(|in_graph| in_graph.interfaces.iter())
        .map(|interface| ComponentName::from(interface.clone()))
        .collect()
}

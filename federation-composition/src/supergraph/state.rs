//! The merged declaration model.
//!
//! Every globally named entity (type, field, argument, enum value, union member, directive) maps
//! each subgraph declaring it to that subgraph's local declaration, next to a single elected
//! "supergraph" declaration. Conflicts are kept as they are: deciding what is compatible is the
//! job of the validation rules.

use apollo_compiler::Name;
use apollo_compiler::Node;
use apollo_compiler::ast::Directive;
use apollo_compiler::ast::DirectiveLocation;
use apollo_compiler::ast::Type;
use apollo_compiler::ast::Value;
use indexmap::IndexMap;
use indexmap::IndexSet;

use crate::subgraph::GraphId;
use crate::subgraph::SubgraphIdentities;
use crate::utils::types::DirectiveLocationExt;
use crate::utils::types::same_nullable_form;

/// Per-subgraph declarations of an entity, in the order subgraphs were given to composition.
pub type ByGraph<T> = IndexMap<GraphId, T>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum TypeKind {
    #[strum(to_string = "Object Type")]
    Object,
    #[strum(to_string = "Interface Type")]
    Interface,
    #[strum(to_string = "Union Type")]
    Union,
    #[strum(to_string = "Enum Type")]
    Enum,
    #[strum(to_string = "Input Object Type")]
    InputObject,
    #[strum(to_string = "Scalar Type")]
    Scalar,
}

#[derive(Debug, Clone)]
pub struct NamedTypeState {
    pub name: Name,
    pub kinds: ByGraph<TypeKind>,
}

/// Object and interface types.
#[derive(Debug, Clone)]
pub struct CompositeTypeState {
    pub name: Name,
    pub description: Option<Node<str>>,
    pub by_graph: ByGraph<CompositeTypeInGraph>,
    pub fields: IndexMap<Name, FieldState>,
}

pub type ObjectTypeState = CompositeTypeState;
pub type InterfaceTypeState = CompositeTypeState;

#[derive(Debug, Clone, Default)]
pub struct CompositeTypeInGraph {
    pub interfaces: IndexSet<Name>,
    pub keys: Vec<KeyInGraph>,
    pub directives: Vec<Node<Directive>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInGraph {
    pub fields: String,
    pub resolvable: bool,
}

#[derive(Debug, Clone)]
pub struct FieldState {
    pub name: Name,
    /// The elected supergraph type.
    pub ty: Type,
    pub description: Option<Node<str>>,
    pub by_graph: ByGraph<FieldInGraph>,
    pub arguments: IndexMap<Name, InputValueState>,
}

#[derive(Debug, Clone)]
pub struct FieldInGraph {
    pub ty: Type,
    pub external: bool,
    pub requires: Option<String>,
    pub provides: Option<String>,
    pub directives: Vec<Node<Directive>>,
}

/// Field arguments, directive arguments and input object fields.
#[derive(Debug, Clone)]
pub struct InputValueState {
    pub name: Name,
    /// The elected supergraph type.
    pub ty: Type,
    pub default_value: Option<Node<Value>>,
    pub description: Option<Node<str>>,
    pub by_graph: ByGraph<InputValueInGraph>,
}

pub type ArgumentState = InputValueState;
pub type InputFieldState = InputValueState;

#[derive(Debug, Clone)]
pub struct InputValueInGraph {
    pub ty: Type,
    pub default_value: Option<Node<Value>>,
    pub directives: Vec<Node<Directive>>,
}

impl InputValueInGraph {
    /// Non-null without a default value: callers have to provide it.
    pub fn is_required(&self) -> bool {
        self.ty.is_non_null() && self.default_value.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct InputObjectTypeState {
    pub name: Name,
    pub description: Option<Node<str>>,
    pub by_graph: ByGraph<Vec<Node<Directive>>>,
    pub fields: IndexMap<Name, InputFieldState>,
}

#[derive(Debug, Clone)]
pub struct EnumTypeState {
    pub name: Name,
    pub description: Option<Node<str>>,
    pub by_graph: ByGraph<Vec<Node<Directive>>>,
    pub values: IndexMap<Name, EnumValueState>,
}

#[derive(Debug, Clone)]
pub struct EnumValueState {
    pub name: Name,
    pub description: Option<Node<str>>,
    pub by_graph: ByGraph<Vec<Node<Directive>>>,
}

#[derive(Debug, Clone)]
pub struct UnionTypeState {
    pub name: Name,
    pub description: Option<Node<str>>,
    pub by_graph: ByGraph<Vec<Node<Directive>>>,
    /// Member type name to the subgraphs declaring the membership.
    pub members: IndexMap<Name, IndexSet<GraphId>>,
}

#[derive(Debug, Clone)]
pub struct ScalarTypeState {
    pub name: Name,
    pub description: Option<Node<str>>,
    pub by_graph: ByGraph<Vec<Node<Directive>>>,
}

#[derive(Debug, Clone)]
pub struct DirectiveState {
    pub name: Name,
    pub description: Option<Node<str>>,
    pub by_graph: ByGraph<DirectiveInGraph>,
    pub arguments: IndexMap<Name, ArgumentState>,
}

#[derive(Debug, Clone, Default)]
pub struct DirectiveInGraph {
    /// Locations in the order of the subgraph's definition.
    pub locations: IndexSet<DirectiveLocation>,
    pub repeatable: bool,
    /// Opted into composition with `@composeDirective`.
    pub compose: bool,
    /// Type-system locations where the subgraph applies the directive.
    pub used_locations: IndexSet<DirectiveLocation>,
}

impl DirectiveState {
    /// Usable in executable documents in at least one subgraph.
    pub fn is_executable(&self) -> bool {
        self.by_graph.values().any(|directive| {
            directive
                .locations
                .iter()
                .any(DirectiveLocationExt::is_executable_location)
        })
    }

    /// Every declaring subgraph opted into composing this directive.
    pub fn is_composed(&self) -> bool {
        !self.by_graph.is_empty() && self.by_graph.values().all(|directive| directive.compose)
    }
}

#[derive(Debug, Clone, Default)]
pub struct RootTypes {
    pub query: Option<Name>,
    pub mutation: Option<Name>,
    pub subscription: Option<Name>,
}

/// The merged declaration model of a single composition run.
#[derive(Debug, Default)]
pub struct SupergraphState {
    pub graphs: SubgraphIdentities,
    pub root_types: RootTypes,
    pub named_types: IndexMap<Name, NamedTypeState>,
    pub object_types: IndexMap<Name, ObjectTypeState>,
    pub interface_types: IndexMap<Name, InterfaceTypeState>,
    pub input_object_types: IndexMap<Name, InputObjectTypeState>,
    pub enum_types: IndexMap<Name, EnumTypeState>,
    pub union_types: IndexMap<Name, UnionTypeState>,
    pub scalar_types: IndexMap<Name, ScalarTypeState>,
    pub directives: IndexMap<Name, DirectiveState>,
}

impl SupergraphState {
    pub fn new(graphs: SubgraphIdentities) -> Self {
        Self {
            graphs,
            ..Default::default()
        }
    }

    pub fn subgraph_count(&self) -> usize {
        self.graphs.len()
    }
}

/// Elects the supergraph type of an output position: the first declaration, relaxed to nullable
/// when another subgraph declares the same type as nullable.
pub(crate) fn elect_output_type(current: &Type, local: &Type) -> Type {
    if same_nullable_form(current, local) && !local.is_non_null() {
        local.clone()
    } else {
        current.clone()
    }
}

/// Elects the supergraph type of an input position: the first declaration, tightened to non-null
/// when another subgraph declares the same type as non-null.
pub(crate) fn elect_input_type(current: &Type, local: &Type) -> Type {
    if same_nullable_form(current, local) && local.is_non_null() {
        local.clone()
    } else {
        current.clone()
    }
}

pub(crate) fn merge_description(current: &mut Option<Node<str>>, local: &Option<Node<str>>) {
    if current.as_deref().is_none_or(str::is_empty) {
        if let Some(local) = local {
            *current = Some(local.clone());
        }
    }
}

//! Definitions and applications of the `link` and `join` spec directives.

use apollo_compiler::Name;
use apollo_compiler::Node;
use apollo_compiler::Schema;
use apollo_compiler::ast::Argument;
use apollo_compiler::ast::Directive;
use apollo_compiler::ast::DirectiveDefinition;
use apollo_compiler::ast::DirectiveList;
use apollo_compiler::ast::DirectiveLocation;
use apollo_compiler::ast::EnumValueDefinition;
use apollo_compiler::ast::Type;
use apollo_compiler::ast::Value;
use apollo_compiler::name;
use apollo_compiler::schema::Component;
use apollo_compiler::schema::EnumType;
use apollo_compiler::schema::ExtendedType;
use apollo_compiler::schema::InputValueDefinition;
use apollo_compiler::schema::ScalarType;
use apollo_compiler::ty;

use crate::subgraph::SubgraphIdentities;
use crate::supergraph::state::KeyInGraph;

const LINK_SPEC_URL: &str = "https://specs.apollo.dev/link/v1.0";
const JOIN_SPEC_URL: &str = "https://specs.apollo.dev/join/v0.3";

fn argument(name: Name, value: Value) -> Node<Argument> {
    Node::new(Argument {
        name,
        value: Node::new(value),
    })
}

fn input_value(name: Name, ty: Type, default_value: Option<Value>) -> Node<InputValueDefinition> {
    Node::new(InputValueDefinition {
        description: None,
        name,
        ty: Node::new(ty),
        default_value: default_value.map(Node::new),
        directives: Default::default(),
    })
}

fn scalar(name: Name) -> ExtendedType {
    ExtendedType::Scalar(Node::new(ScalarType {
        description: None,
        name,
        directives: Default::default(),
    }))
}

fn insert_directive_definition(supergraph: &mut Schema, definition: DirectiveDefinition) {
    supergraph
        .directive_definitions
        .insert(definition.name.clone(), Node::new(definition));
}

/// Adds `@link(url: "https://specs.apollo.dev/link/v1.0")` to the schema definition, with the
/// `@link` directive and its `link__Purpose` and `link__Import` types.
pub(super) fn add_core_feature_link(supergraph: &mut Schema) {
    supergraph
        .schema_definition
        .make_mut()
        .directives
        .push(Component::new(Directive {
            name: name!("link"),
            arguments: vec![argument(name!("url"), Value::String(LINK_SPEC_URL.to_owned()))],
        }));

    let (name, link_purpose_enum) = link_purpose_enum_type();
    supergraph
        .types
        .insert(name, ExtendedType::Enum(Node::new(link_purpose_enum)));
    supergraph
        .types
        .insert(name!("link__Import"), scalar(name!("link__Import")));
    insert_directive_definition(supergraph, link_directive_definition());
}

/// directive @link(url: String, as: String, for: link__Purpose, import: [link__Import]) repeatable on SCHEMA
fn link_directive_definition() -> DirectiveDefinition {
    DirectiveDefinition {
        description: None,
        name: name!("link"),
        arguments: vec![
            input_value(name!("url"), ty!(String), None),
            input_value(name!("as"), ty!(String), None),
            input_value(name!("for"), ty!(link__Purpose), None),
            input_value(name!("import"), ty!([link__Import]), None),
        ],
        repeatable: true,
        locations: vec![DirectiveLocation::Schema],
    }
}

fn link_purpose_enum_type() -> (Name, EnumType) {
    let mut link_purpose_enum = EnumType {
        description: None,
        name: name!("link__Purpose"),
        directives: Default::default(),
        values: Default::default(),
    };
    for (value, description) in [
        (
            name!("SECURITY"),
            "`SECURITY` features provide metadata necessary to securely resolve fields.",
        ),
        (
            name!("EXECUTION"),
            "`EXECUTION` features provide metadata necessary for operation execution.",
        ),
    ] {
        link_purpose_enum.values.insert(
            value.clone(),
            Component::new(EnumValueDefinition {
                description: Some(description.into()),
                value,
                directives: Default::default(),
            }),
        );
    }
    (link_purpose_enum.name.clone(), link_purpose_enum)
}

/// Adds `@link(url: "https://specs.apollo.dev/join/v0.3", for: EXECUTION)` to the schema
/// definition, with the join directives, `join__FieldSet` and the `join__Graph` enum listing
/// every subgraph.
pub(super) fn add_core_feature_join(supergraph: &mut Schema, graphs: &SubgraphIdentities) {
    supergraph
        .schema_definition
        .make_mut()
        .directives
        .push(Component::new(Directive {
            name: name!("link"),
            arguments: vec![
                argument(name!("url"), Value::String(JOIN_SPEC_URL.to_owned())),
                argument(name!("for"), Value::Enum(name!("EXECUTION"))),
            ],
        }));

    supergraph
        .types
        .insert(name!("join__FieldSet"), scalar(name!("join__FieldSet")));

    for definition in [
        join_graph_directive_definition(),
        join_type_directive_definition(),
        join_field_directive_definition(),
        join_implements_directive_definition(),
        join_union_member_directive_definition(),
        join_enum_value_directive_definition(),
    ] {
        insert_directive_definition(supergraph, definition);
    }

    let (name, join_graph_enum) = join_graph_enum_type(graphs);
    supergraph
        .types
        .insert(name, ExtendedType::Enum(Node::new(join_graph_enum)));
}

/// directive @join__graph(name: String!, url: String!) on ENUM_VALUE
fn join_graph_directive_definition() -> DirectiveDefinition {
    DirectiveDefinition {
        description: None,
        name: name!("join__graph"),
        arguments: vec![
            input_value(name!("name"), ty!(String!), None),
            input_value(name!("url"), ty!(String!), None),
        ],
        repeatable: false,
        locations: vec![DirectiveLocation::EnumValue],
    }
}

/// directive @join__type(
///   graph: join__Graph!,
///   key: join__FieldSet,
///   extension: Boolean! = false,
///   resolvable: Boolean! = true,
///   isInterfaceObject: Boolean! = false
/// ) repeatable on OBJECT | INTERFACE | UNION | ENUM | INPUT_OBJECT | SCALAR
fn join_type_directive_definition() -> DirectiveDefinition {
    DirectiveDefinition {
        description: None,
        name: name!("join__type"),
        arguments: vec![
            input_value(name!("graph"), ty!(join__Graph!), None),
            input_value(name!("key"), ty!(join__FieldSet), None),
            input_value(name!("extension"), ty!(Boolean!), Some(Value::Boolean(false))),
            input_value(name!("resolvable"), ty!(Boolean!), Some(Value::Boolean(true))),
            input_value(
                name!("isInterfaceObject"),
                ty!(Boolean!),
                Some(Value::Boolean(false)),
            ),
        ],
        repeatable: true,
        locations: vec![
            DirectiveLocation::Object,
            DirectiveLocation::Interface,
            DirectiveLocation::Union,
            DirectiveLocation::Enum,
            DirectiveLocation::InputObject,
            DirectiveLocation::Scalar,
        ],
    }
}

/// directive @join__field(
///   graph: join__Graph,
///   requires: join__FieldSet,
///   provides: join__FieldSet,
///   type: String,
///   external: Boolean,
///   override: String,
///   usedOverridden: Boolean
/// ) repeatable on FIELD_DEFINITION | INPUT_FIELD_DEFINITION
fn join_field_directive_definition() -> DirectiveDefinition {
    DirectiveDefinition {
        description: None,
        name: name!("join__field"),
        arguments: vec![
            input_value(name!("graph"), ty!(join__Graph), None),
            input_value(name!("requires"), ty!(join__FieldSet), None),
            input_value(name!("provides"), ty!(join__FieldSet), None),
            input_value(name!("type"), ty!(String), None),
            input_value(name!("external"), ty!(Boolean), None),
            input_value(name!("override"), ty!(String), None),
            input_value(name!("usedOverridden"), ty!(Boolean), None),
        ],
        repeatable: true,
        locations: vec![
            DirectiveLocation::FieldDefinition,
            DirectiveLocation::InputFieldDefinition,
        ],
    }
}

/// directive @join__implements(graph: join__Graph!, interface: String!) repeatable on OBJECT | INTERFACE
fn join_implements_directive_definition() -> DirectiveDefinition {
    DirectiveDefinition {
        description: None,
        name: name!("join__implements"),
        arguments: vec![
            input_value(name!("graph"), ty!(join__Graph!), None),
            input_value(name!("interface"), ty!(String!), None),
        ],
        repeatable: true,
        locations: vec![DirectiveLocation::Object, DirectiveLocation::Interface],
    }
}

/// directive @join__unionMember(graph: join__Graph!, member: String!) repeatable on UNION
fn join_union_member_directive_definition() -> DirectiveDefinition {
    DirectiveDefinition {
        description: None,
        name: name!("join__unionMember"),
        arguments: vec![
            input_value(name!("graph"), ty!(join__Graph!), None),
            input_value(name!("member"), ty!(String!), None),
        ],
        repeatable: true,
        locations: vec![DirectiveLocation::Union],
    }
}

/// directive @join__enumValue(graph: join__Graph!) repeatable on ENUM_VALUE
fn join_enum_value_directive_definition() -> DirectiveDefinition {
    DirectiveDefinition {
        description: None,
        name: name!("join__enumValue"),
        arguments: vec![input_value(name!("graph"), ty!(join__Graph!), None)],
        repeatable: true,
        locations: vec![DirectiveLocation::EnumValue],
    }
}

/// enum join__Graph, one value per subgraph in input order.
fn join_graph_enum_type(graphs: &SubgraphIdentities) -> (Name, EnumType) {
    let mut join_graph_enum = EnumType {
        description: None,
        name: name!("join__Graph"),
        directives: Default::default(),
        values: Default::default(),
    };
    for (_, graph) in graphs.iter() {
        let join_graph_directive = Directive {
            name: name!("join__graph"),
            arguments: vec![
                argument(name!("name"), Value::String(graph.name.clone())),
                argument(
                    name!("url"),
                    Value::String(graph.url.clone().unwrap_or_default()),
                ),
            ],
        };
        join_graph_enum.values.insert(
            graph.enum_value.clone(),
            Component::new(EnumValueDefinition {
                description: None,
                value: graph.enum_value.clone(),
                directives: DirectiveList(vec![Node::new(join_graph_directive)]),
            }),
        );
    }
    (join_graph_enum.name.clone(), join_graph_enum)
}

/// `@join__type(graph: G)`, or `@join__type(graph: G, key: "...")` for an entity key.
pub(super) fn join_type_directive(graph: &Name, key: Option<&KeyInGraph>) -> Directive {
    let mut arguments = vec![argument(name!("graph"), Value::Enum(graph.clone()))];
    if let Some(key) = key {
        arguments.push(argument(name!("key"), Value::String(key.fields.clone())));
        if !key.resolvable {
            arguments.push(argument(name!("resolvable"), Value::Boolean(false)));
        }
    }
    Directive {
        name: name!("join__type"),
        arguments,
    }
}

pub(super) fn join_implements_directive(graph: &Name, interface: &Name) -> Directive {
    Directive {
        name: name!("join__implements"),
        arguments: vec![
            argument(name!("graph"), Value::Enum(graph.clone())),
            argument(name!("interface"), Value::String(interface.to_string())),
        ],
    }
}

/// Arguments of a `@join__field` application beyond `graph`.
#[derive(Debug, Default)]
pub(super) struct JoinField<'a> {
    pub(super) requires: Option<&'a str>,
    pub(super) provides: Option<&'a str>,
    /// The subgraph-local type, when it differs from the supergraph type.
    pub(super) ty: Option<&'a Type>,
    pub(super) external: bool,
}

pub(super) fn join_field_directive(graph: &Name, join_field: JoinField<'_>) -> Directive {
    let mut arguments = vec![argument(name!("graph"), Value::Enum(graph.clone()))];
    if let Some(requires) = join_field.requires {
        arguments.push(argument(name!("requires"), Value::String(requires.to_owned())));
    }
    if let Some(provides) = join_field.provides {
        arguments.push(argument(name!("provides"), Value::String(provides.to_owned())));
    }
    if let Some(ty) = join_field.ty {
        arguments.push(argument(name!("type"), Value::String(ty.to_string())));
    }
    if join_field.external {
        arguments.push(argument(name!("external"), Value::Boolean(true)));
    }
    Directive {
        name: name!("join__field"),
        arguments,
    }
}

pub(super) fn join_union_member_directive(graph: &Name, member: &Name) -> Directive {
    Directive {
        name: name!("join__unionMember"),
        arguments: vec![
            argument(name!("graph"), Value::Enum(graph.clone())),
            argument(name!("member"), Value::String(member.to_string())),
        ],
    }
}

pub(super) fn join_enum_value_directive(graph: &Name) -> Directive {
    Directive {
        name: name!("join__enumValue"),
        arguments: vec![argument(name!("graph"), Value::Enum(graph.clone()))],
    }
}

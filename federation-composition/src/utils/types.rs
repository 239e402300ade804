use apollo_compiler::ast::DirectiveLocation;
use apollo_compiler::ast::Type;

/// Strips the outermost non-null modifier, `[Int]!` becomes `[Int]`.
pub(crate) fn nullable(ty: &Type) -> Type {
    match ty {
        Type::NonNullNamed(name) => Type::Named(name.clone()),
        Type::NonNullList(inner) => Type::List(inner.clone()),
        other => other.clone(),
    }
}

/// Adds the outermost non-null modifier, `[Int]` becomes `[Int]!`.
pub(crate) fn non_null(ty: &Type) -> Type {
    match ty {
        Type::Named(name) => Type::NonNullNamed(name.clone()),
        Type::List(inner) => Type::NonNullList(inner.clone()),
        other => other.clone(),
    }
}

/// Whether two types only differ by their outermost non-null modifier.
pub(crate) fn same_nullable_form(a: &Type, b: &Type) -> bool {
    nullable(a) == nullable(b)
}

/// Normalizes a subgraph-local input type against the supergraph input type.
///
/// A nullable local declaration of a non-null supergraph type is read as non-null: it is a valid
/// narrowing of the supergraph contract. Types with a different base are returned as is.
pub(crate) fn normalize_input_type(supergraph: &Type, local: &Type) -> Type {
    if same_nullable_form(supergraph, local) && supergraph.is_non_null() {
        non_null(local)
    } else {
        local.clone()
    }
}

/// Output counterpart of [`normalize_input_type`]: a non-null local field satisfies a nullable
/// supergraph field of the same base.
pub(crate) fn normalize_output_type(supergraph: &Type, local: &Type) -> Type {
    if same_nullable_form(supergraph, local) && !supergraph.is_non_null() {
        nullable(local)
    } else {
        local.clone()
    }
}

/// Locations a directive can be used at in executable documents.
pub(crate) const EXECUTABLE_DIRECTIVE_LOCATIONS: [DirectiveLocation; 8] = [
    DirectiveLocation::Query,
    DirectiveLocation::Mutation,
    DirectiveLocation::Subscription,
    DirectiveLocation::Field,
    DirectiveLocation::FragmentDefinition,
    DirectiveLocation::FragmentSpread,
    DirectiveLocation::InlineFragment,
    DirectiveLocation::VariableDefinition,
];

pub(crate) trait DirectiveLocationExt {
    fn is_executable_location(&self) -> bool;
}

impl DirectiveLocationExt for DirectiveLocation {
    fn is_executable_location(&self) -> bool {
        EXECUTABLE_DIRECTIVE_LOCATIONS.contains(self)
    }
}

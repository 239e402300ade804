mod argument_types;
mod executable_directives;
mod subgraph_names;
mod supergraph_output;
mod validation_rules;

pub(crate) mod test_helpers {
    use federation_composition::CompositionError;
    use federation_composition::CompositionOptions;
    use federation_composition::Supergraph;
    use federation_composition::compose_with_options;
    use federation_composition::subgraph::Subgraph;

    pub(crate) struct ServiceDefinition<'a> {
        pub(crate) name: &'a str,
        pub(crate) url: Option<&'a str>,
        pub(crate) type_defs: &'a str,
    }

    pub(crate) fn service<'a>(name: &'a str, type_defs: &'a str) -> ServiceDefinition<'a> {
        ServiceDefinition {
            name,
            url: None,
            type_defs,
        }
    }

    pub(crate) fn compose_services(
        services: &[ServiceDefinition<'_>],
    ) -> Result<Supergraph, Vec<CompositionError>> {
        compose_services_with_options(services, &CompositionOptions::default())
    }

    pub(crate) fn compose_services_with_options(
        services: &[ServiceDefinition<'_>],
        options: &CompositionOptions,
    ) -> Result<Supergraph, Vec<CompositionError>> {
        let subgraphs = services
            .iter()
            .map(|service| Subgraph::parse(service.name, service.url, service.type_defs))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|error| vec![error])?;
        compose_with_options(subgraphs, options)
    }

    /// The `@link` header federation subgraphs start with.
    pub(crate) fn federation_link(version: &str, imports: &str) -> String {
        format!(
            r#"extend schema @link(url: "https://specs.apollo.dev/federation/{version}", import: [{imports}])"#
        )
    }

    fn collapse_whitespace(sdl: &str) -> String {
        sdl.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Whether `sdl` contains `expected`, ignoring differences in whitespace.
    pub(crate) fn contains_graphql(sdl: &str, expected: &str) -> bool {
        collapse_whitespace(sdl).contains(&collapse_whitespace(expected))
    }

    #[track_caller]
    pub(crate) fn assert_contains_graphql(sdl: &str, expected: &str) {
        assert!(
            contains_graphql(sdl, expected),
            "expected supergraph to contain:\n{expected}\nsupergraph:\n{sdl}"
        );
    }

    pub(crate) fn error_codes(errors: &[CompositionError]) -> Vec<&'static str> {
        errors.iter().map(CompositionError::code).collect()
    }
}

pub(crate) use test_helpers::ServiceDefinition;
pub(crate) use test_helpers::assert_contains_graphql;
pub(crate) use test_helpers::compose_services;
pub(crate) use test_helpers::compose_services_with_options;
pub(crate) use test_helpers::contains_graphql;
pub(crate) use test_helpers::error_codes;
pub(crate) use test_helpers::federation_link;
pub(crate) use test_helpers::service;

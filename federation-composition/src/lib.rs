//! ## Usage
//!
//! Composes independently authored GraphQL subgraph schemas into a single supergraph schema,
//! annotated with the `@join__*` directives a federated query planner relies on.
//!
//! ```
//! use federation_composition::compose;
//! use federation_composition::subgraph::Subgraph;
//!
//! let users = Subgraph::parse("users", Some("http://users"), "type Query { me: String }").unwrap();
//! let posts = Subgraph::parse("posts", Some("http://posts"), "type Query { posts: [String] }").unwrap();
//! let supergraph = compose(vec![users, posts]).unwrap();
//! assert!(supergraph.supergraph_sdl().contains("me: String @join__field(graph: USERS)"));
//! ```
//!
//! Composition either fails early, when subgraph names cannot be told apart, or validates the
//! merged declarations with every rule of [`validation::SUPERGRAPH_RULES`] and reports all errors
//! at once.

#![warn(
    rustdoc::broken_intra_doc_links,
    unreachable_pub,
    unreachable_patterns,
    unused,
    unused_qualifications,
    dead_code,
    while_true,
    unconditional_panic,
    clippy::all
)]

pub mod composition;
pub mod error;
pub mod subgraph;
pub mod supergraph;
pub(crate) mod utils;
pub mod validation;

pub use crate::composition::CompositionOptions;
pub use crate::composition::CompositionOutput;
pub use crate::composition::compose;
pub use crate::composition::compose_with_options;
pub use crate::error::CompositionError;
pub use crate::supergraph::Supergraph;

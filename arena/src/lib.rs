pub mod cli;
pub mod config;
pub mod github;
pub mod resolver;

// Re-export core types for convenience
pub use arena_core::{
    Dependency, ParseError, RefSpec, Requirement, SemVer, TableRenderer, parse_dependency,
};

pub mod grammar;
pub mod output;
pub mod parser;
pub mod scheme;
pub mod types;
pub mod version;

// Re-export commonly used types at crate root
pub use grammar::{ParseError, parse_dependency};
pub use output::TableRenderer;
pub use parser::{Match, Parser};
pub use scheme::Scheme;
pub use types::{Dependency, RefSpec, Requirement};
pub use version::{SemVer, VersionError};


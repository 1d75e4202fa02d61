use crate::version::SemVer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use url::Url;

/// Version or source-control reference as written after a dependency URL
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RefSpec {
    /// @branch:name
    Branch(String),
    /// @1.2.3
    Exact(SemVer),
    /// @from:1.2.3
    From(SemVer),
    /// @1.2.3..<2.0.0 (an inclusive `...` upper bound is stored exclusive)
    Range { lower: SemVer, upper: SemVer },
    /// @revision:hash
    Revision(String),
    /// Nothing after the URL
    NoVersion,
}

/// Requirement attached to a resolved dependency
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Requirement {
    Exact(SemVer),
    Range { lower: SemVer, upper: SemVer },
    Revision(String),
    Branch(String),
    /// Local checkout, no version applies
    Path,
    From(SemVer),
    NoVersion,
}

impl Requirement {
    /// `>= version, < next major`
    pub fn up_to_next_major(version: SemVer) -> Option<Requirement> {
        version.next_major().map(|upper| Requirement::Range {
            lower: version,
            upper,
        })
    }

    /// Short name of the variant, used for display
    pub fn kind(&self) -> &'static str {
        match self {
            Requirement::Exact(_) => "exact",
            Requirement::Range { .. } => "range",
            Requirement::Revision(_) => "revision",
            Requirement::Branch(_) => "branch",
            Requirement::Path => "path",
            Requirement::From(_) => "from",
            Requirement::NoVersion => "none",
        }
    }

    pub fn has_version(&self) -> bool {
        *self != Requirement::NoVersion
    }
}

/// Written in the same syntax the grammar accepts after a URL
impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Requirement::Exact(v) => write!(f, "@{v}"),
            Requirement::Range { lower, upper } => write!(f, "@{lower}..<{upper}"),
            Requirement::Revision(r) => write!(f, "@revision:{r}"),
            Requirement::Branch(b) => write!(f, "@branch:{b}"),
            Requirement::From(v) => write!(f, "@from:{v}"),
            Requirement::Path | Requirement::NoVersion => Ok(()),
        }
    }
}

/// A dependency location plus its requirement
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dependency {
    pub url: Url,
    pub requirement: Requirement,
}

impl Dependency {
    /// Combine a parsed URL and ref spec. A missing version on a `file://` URL
    /// means a local path dependency.
    pub fn new(url: Url, ref_spec: RefSpec) -> Self {
        let requirement = match ref_spec {
            RefSpec::Branch(b) => Requirement::Branch(b),
            RefSpec::Exact(v) => Requirement::Exact(v),
            RefSpec::From(v) => Requirement::From(v),
            RefSpec::Range { lower, upper } => Requirement::Range { lower, upper },
            RefSpec::Revision(r) => Requirement::Revision(r),
            RefSpec::NoVersion if url.scheme() == "file" => Requirement::Path,
            RefSpec::NoVersion => Requirement::NoVersion,
        };
        Self { url, requirement }
    }

    /// Build a dependency from an already resolved requirement
    pub fn with_requirement(url: Url, requirement: Requirement) -> Self {
        Self { url, requirement }
    }

    pub fn is_file_url(&self) -> bool {
        self.url.scheme() == "file"
    }

    /// Filesystem path of a local path dependency
    pub fn path(&self) -> Option<PathBuf> {
        match self.requirement {
            Requirement::Path => self.url.to_file_path().ok(),
            _ => None,
        }
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.url, self.requirement)
    }
}

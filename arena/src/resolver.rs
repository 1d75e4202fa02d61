//! Turns a command line dependency argument into a fully resolved
//! [`Dependency`].
//!
//! The grammar alone cannot tell a relative path `owner/repo` from a hosting
//! shorthand, and it leaves the version open when none was given. Both
//! decisions need the outside world, so they go through [`PathProbe`] and
//! [`ReleaseLookup`], which tests replace with fakes.

use arena_core::{Dependency, ParseError, Requirement, SemVer, parse_dependency};
use std::future::Future;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

use crate::github::Repository;

/// Requirement used when no release can be found
pub const DEFAULT_REQUIREMENT: Requirement = Requirement::From(SemVer::new(0, 0, 0));

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error(transparent)]
    InvalidDependency(#[from] ParseError),
    #[error("'{0}' is not a valid path")]
    InvalidPath(String),
}

/// Answers whether a local path exists
pub trait PathProbe {
    fn exists(&self, path: &Path) -> bool;
}

/// Checks the real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsProbe;

impl PathProbe for FsProbe {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// Finds the latest released version of a repository
pub trait ReleaseLookup {
    fn latest_release(
        &self,
        repository: &Repository,
    ) -> impl Future<Output = Option<SemVer>> + Send;
}

/// Never finds a release; used with `--offline`
#[derive(Debug, Clone, Copy, Default)]
pub struct Offline;

impl ReleaseLookup for Offline {
    async fn latest_release(&self, _repository: &Repository) -> Option<SemVer> {
        None
    }
}

pub struct DependencyResolver<P, L> {
    probe: P,
    lookup: L,
    shorthand_host: String,
}

impl<P: PathProbe, L: ReleaseLookup> DependencyResolver<P, L> {
    pub fn new(probe: P, lookup: L, shorthand_host: &str) -> Self {
        Self {
            probe,
            lookup,
            shorthand_host: shorthand_host.to_string(),
        }
    }

    /// Resolve one argument:
    ///
    /// - a path that does not exist is retried as `https://{host}/{argument}`
    /// - a URL without a version gets `from(latest release)`
    /// - everything else is kept as parsed
    pub async fn resolve(&self, argument: &str) -> Result<Dependency, ResolveError> {
        let dep = parse_dependency(argument)?;

        let path_exists = dep.path().is_some_and(|path| self.probe.exists(&path));
        let has_version = dep.requirement.has_version();

        match (dep.is_file_url(), path_exists, has_version) {
            (true, false, _) => {
                debug!(argument, "no such path, trying shorthand");
                let shorthand = self.shorthand(argument)?;
                Ok(self.with_latest_version(shorthand).await)
            }
            (false, _, true) | (true, true, _) => Ok(dep),
            (false, _, false) => Ok(self.with_latest_version(dep).await),
        }
    }

    /// `owner/repo[@refspec]` on the shorthand host
    fn shorthand(&self, argument: &str) -> Result<Dependency, ResolveError> {
        let name = argument.split('@').next().unwrap_or_default();
        let parts: Vec<&str> = name.split('/').collect();
        if parts.len() != 2 || parts.iter().any(|p| p.is_empty()) {
            return Err(ResolveError::InvalidPath(argument.to_string()));
        }
        Ok(parse_dependency(&format!(
            "https://{}/{argument}",
            self.shorthand_host
        ))?)
    }

    async fn with_latest_version(&self, dep: Dependency) -> Dependency {
        if dep.requirement.has_version() {
            return dep;
        }

        let Some(repository) = Repository::from_url(&dep.url) else {
            debug!(url = %dep.url, "not an owner/repo url, using default requirement");
            return Dependency::with_requirement(dep.url, DEFAULT_REQUIREMENT);
        };

        let requirement = match self.lookup.latest_release(&repository).await {
            Some(version) => Requirement::From(version),
            None => {
                warn!(%repository, "no release found, defaulting to {DEFAULT_REQUIREMENT:?}");
                DEFAULT_REQUIREMENT
            }
        };
        Dependency::with_requirement(dep.url, requirement)
    }
}

use std::path::{Component, Path, PathBuf};
use url::Url;

/// URL prefixes recognized in front of a dependency location, in the order
/// they are tried
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    Https,
    Http,
    /// `git@host:owner/repo`, rewritten to `ssh://git@host/owner/repo`
    Git,
    File,
    /// `file:/path`, treated like `file:///path`
    NonstandardFile,
    /// No prefix: a filesystem path
    Empty,
}

impl Scheme {
    pub const ALL: [Scheme; 6] = [
        Scheme::Https,
        Scheme::Http,
        Scheme::Git,
        Scheme::File,
        Scheme::NonstandardFile,
        Scheme::Empty,
    ];

    pub fn prefix(&self) -> &'static str {
        match self {
            Scheme::Https => "https://",
            Scheme::Http => "http://",
            Scheme::Git => "git@",
            Scheme::File => "file://",
            Scheme::NonstandardFile => "file:",
            Scheme::Empty => "",
        }
    }

    /// Build the URL for `body`, the text that followed the prefix. Bare paths
    /// are resolved against the current directory at call time.
    pub fn url(&self, body: &str) -> Option<Url> {
        match self {
            Scheme::Https | Scheme::Http | Scheme::File => {
                Url::parse(&format!("{}{body}", self.prefix())).ok()
            }
            Scheme::Git => {
                let body = body.replacen(':', "/", 1);
                Url::parse(&format!("ssh://git@{body}")).ok()
            }
            Scheme::NonstandardFile => Url::parse(&format!("file://{body}")).ok(),
            Scheme::Empty => {
                let cwd = std::env::current_dir().ok()?;
                let path = resolve_path(body, &cwd, dirs::home_dir().as_deref());
                Url::from_file_path(path).ok()
            }
        }
    }
}

/// Turn a user supplied path into an absolute one: `~` expands to `home`,
/// relative paths are joined onto `cwd`, and `.`/`..` are folded lexically.
pub fn resolve_path(raw: &str, cwd: &Path, home: Option<&Path>) -> PathBuf {
    let expanded = match (raw.strip_prefix('~'), home) {
        (Some(""), Some(home)) => home.to_path_buf(),
        (Some(rest), Some(home)) if rest.starts_with('/') => {
            home.join(rest.trim_start_matches('/'))
        }
        _ => PathBuf::from(raw),
    };

    let joined = if expanded.is_absolute() {
        expanded
    } else {
        cwd.join(expanded)
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

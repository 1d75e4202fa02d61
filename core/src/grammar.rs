//! Grammar for single-line dependency strings such as
//! `https://github.com/owner/repo@from:1.2.3` or `../local/checkout`.
//!
//! ```text
//! dependency := url refspec
//! url        := scheme body          body runs up to '@' or the end
//! refspec    := "" | "@" version | "@from:" version | "@branch:" name
//!             | "@revision:" text | "@" version "..<" version
//!             | "@" version "..." version
//! ```

use std::str::FromStr;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::parser::{
    Parser, always, char_in, end, int, literal, never, one_of, prefix_up_to, prefix_while, string,
    zip, zip4, zip5,
};
use crate::scheme::Scheme;
use crate::types::{Dependency, RefSpec};
use crate::version::SemVer;

/// A dependency string the grammar could not consume completely
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid dependency '{input}': unrecognized text '{rest}'")]
pub struct ParseError {
    pub input: String,
    pub rest: String,
}

// Branch names follow a subset of git-check-ref-format.
fn is_branch_char(c: char) -> bool {
    c.is_alphabetic() || matches!(c, '.' | '-' | '@' | '/')
}

fn is_branch_start_char(c: char) -> bool {
    is_branch_char(c) && c != '/'
}

fn is_branch_end_char(c: char) -> bool {
    is_branch_char(c) && !matches!(c, '/' | '.')
}

/// `major.minor.patch`
pub fn version() -> Parser<SemVer> {
    zip5(int(), literal("."), int(), literal("."), int())
        .map(|(major, (), minor, (), patch)| SemVer::new(major, minor, patch))
}

/// A branch name: at least two characters, the first not `/`, the last
/// neither `/` nor `.`
pub fn branch_name() -> Parser<String> {
    zip(char_in(is_branch_start_char), prefix_while(is_branch_char)).flat_map(|(head, tail)| {
        match tail.chars().next_back() {
            Some(last) if is_branch_end_char(last) => always(format!("{head}{tail}")),
            _ => never(),
        }
    })
}

pub fn branch() -> Parser<RefSpec> {
    zip(literal("@branch:"), branch_name()).map(|((), name)| RefSpec::Branch(name))
}

pub fn exact() -> Parser<RefSpec> {
    zip(literal("@"), version()).map(|((), v)| RefSpec::Exact(v))
}

pub fn from() -> Parser<RefSpec> {
    zip(literal("@from:"), version()).map(|((), v)| RefSpec::From(v))
}

pub fn no_version() -> Parser<RefSpec> {
    end().map(|()| RefSpec::NoVersion)
}

/// `@lower..<upper` or `@lower...upper`; the inclusive form is stored with
/// the upper patch raised by one. Bounds must not be inverted.
pub fn range() -> Parser<RefSpec> {
    let bounded = |op: &str| zip4(literal("@"), version(), string(op), version());
    one_of(vec![bounded("..<"), bounded("...")]).flat_map(|((), lower, op, upper)| {
        if upper < lower {
            return never();
        }
        let upper = if op == "..<" {
            Some(upper)
        } else {
            upper.next_patch()
        };
        match upper {
            Some(upper) => always(RefSpec::Range { lower, upper }),
            None => never(),
        }
    })
}

pub fn revision() -> Parser<RefSpec> {
    zip(literal("@revision:"), prefix_while(|c| !c.is_whitespace()))
        .map(|((), text)| RefSpec::Revision(text))
}

/// Any of the ref spec forms. Each alternative must reach the end of input so
/// that `@1.2.3` cannot win over `@1.2.3..<2.0.0`.
pub fn ref_spec() -> Parser<RefSpec> {
    let alternatives = [branch(), exact(), from(), no_version(), range(), revision()];
    one_of(alternatives.into_iter().map(Parser::exhaustive).collect())
}

pub fn scheme() -> Parser<Scheme> {
    one_of(
        Scheme::ALL
            .into_iter()
            .map(|scheme| literal(scheme.prefix()).map(move |()| scheme))
            .collect(),
    )
}

/// A scheme-qualified URL or a filesystem path, up to the first `@`
pub fn url() -> Parser<Url> {
    zip(scheme(), prefix_up_to("@")).flat_map(|(scheme, body)| {
        match scheme.url(&body) {
            Some(url) => always(url),
            None => never(),
        }
    })
}

pub fn dependency() -> Parser<Dependency> {
    zip(url(), ref_spec()).map(|(url, ref_spec)| Dependency::new(url, ref_spec))
}

/// Parse a complete dependency string
pub fn parse_dependency(input: &str) -> Result<Dependency, ParseError> {
    let m = dependency().run(input);
    match m.result {
        Some(dep) if m.rest.is_empty() => Ok(dep),
        _ => {
            debug!(input, rest = m.rest, "rejected dependency string");
            Err(ParseError {
                input: input.to_string(),
                rest: m.rest.to_string(),
            })
        }
    }
}

impl FromStr for Dependency {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_dependency(s)
    }
}

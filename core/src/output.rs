use crate::types::{Dependency, Requirement};
use colored::Colorize;

/// Renders resolved dependencies in a table format
pub struct TableRenderer {
    show_colors: bool,
}

impl TableRenderer {
    pub fn new(show_colors: bool) -> Self {
        Self { show_colors }
    }

    /// Print all dependencies to stdout
    pub fn render(&self, dependencies: &[Dependency]) {
        for line in self.lines(dependencies) {
            println!("{line}");
        }
    }

    /// Build the table rows without printing them
    pub fn lines(&self, dependencies: &[Dependency]) -> Vec<String> {
        if dependencies.is_empty() {
            return vec!["No dependencies given.".to_string()];
        }

        let max_url = dependencies
            .iter()
            .map(|d| d.url.as_str().len())
            .max()
            .unwrap_or(0);

        let max_kind = dependencies
            .iter()
            .map(|d| d.requirement.kind().len())
            .max()
            .unwrap_or(0);

        dependencies
            .iter()
            .map(|dep| self.format_row(dep, max_url, max_kind))
            .collect()
    }

    fn format_row(&self, dep: &Dependency, url_width: usize, kind_width: usize) -> String {
        // pad before coloring, escape codes would throw off the width
        let kind = format!("{:<kind_width$}", dep.requirement.kind());
        let row = format!(
            "  {:<url_width$}  {}  {}",
            dep.url.as_str(),
            self.format_kind(&dep.requirement, &kind),
            Self::detail(&dep.requirement),
        );
        row.trim_end().to_string()
    }

    /// Human readable requirement value
    fn detail(requirement: &Requirement) -> String {
        match requirement {
            Requirement::Exact(v) => v.to_string(),
            Requirement::From(v) => format!(">= {v}"),
            Requirement::Range { lower, upper } => format!("{lower} ..< {upper}"),
            Requirement::Branch(b) => b.clone(),
            Requirement::Revision(r) => r.clone(),
            Requirement::Path | Requirement::NoVersion => String::new(),
        }
    }

    /// Format the requirement kind with optional colors
    pub fn format_kind(&self, requirement: &Requirement, text: &str) -> String {
        if !self.show_colors {
            return text.to_string();
        }
        match requirement {
            Requirement::Exact(_) | Requirement::Revision(_) => text.red().to_string(),
            Requirement::Range { .. } | Requirement::Branch(_) => text.yellow().to_string(),
            Requirement::From(_) => text.green().to_string(),
            Requirement::Path | Requirement::NoVersion => text.dimmed().to_string(),
        }
    }
}

//! Human-readable markdown tree document.

use std::path::Path;

use itertools::Itertools;
use tracing::info;

use treewise_analyze::{Priority, Report, Severity};
use treewise_core::Node;

use crate::error::ReportError;

/// Number of extensions listed in the summary.
const TOP_EXTENSIONS: usize = 10;

/// Renders a [`Report`] as a markdown document.
#[derive(Debug, Clone, Default)]
pub struct MarkdownRenderer {
    title: Option<String>,
}

impl MarkdownRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self { title: None }
    }

    /// Override the heading; defaults to "<root name> Project Structure".
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    const fn severity_marker(severity: Severity) -> &'static str {
        match severity {
            Severity::Critical => "🔴",
            Severity::Warning => "🟡",
            Severity::Info => "🔵",
        }
    }

    const fn priority_marker(priority: Priority) -> &'static str {
        match priority {
            Priority::High => "🔴",
            Priority::Medium => "🟡",
            Priority::Low => "🔵",
        }
    }

    pub fn render(&self, report: &Report) -> String {
        let title = self
            .title
            .clone()
            .unwrap_or_else(|| format!("{} Project Structure", report.structure.name));
        let stats = &report.statistics;

        let mut lines = vec![
            format!("# {title}"),
            String::new(),
            format!("Generated: {}", report.generated_at.to_rfc3339()),
            String::new(),
            "## 📊 Statistics".to_string(),
            String::new(),
            format!("- **Total Files**: {}", stats.total_files),
            format!("- **Total Directories**: {}", stats.total_directories),
            format!("- **Total Size**: {} MB", stats.total_size_mb),
            format!(
                "- **Total Lines of Code**: {}",
                group_thousands(stats.total_lines)
            ),
            format!("- **Deepest Nesting**: {} levels", stats.deepest_nesting),
            String::new(),
            "### Files by Extension".to_string(),
            String::new(),
        ];

        for (ext, count) in stats.top_extensions(TOP_EXTENSIONS) {
            lines.push(format!("- `{ext}`: {count} files"));
        }

        lines.push(String::new());
        lines.push("## 📁 Directory Structure".to_string());
        lines.push(String::new());
        lines.push("```".to_string());
        render_children(&report.structure, "", &mut lines);
        lines.push("```".to_string());

        if !report.issues.is_empty() {
            lines.push(String::new());
            lines.push("## ⚠️ Issues Found".to_string());
            for issue in &report.issues {
                lines.push(String::new());
                lines.push(format!(
                    "{} **{}**",
                    Self::severity_marker(issue.severity),
                    issue.message
                ));
                lines.push(format!("   - {}", issue.recommendation));
            }
        }

        lines.push(String::new());
        lines.push("## 💡 Recommendations".to_string());
        for rec in &report.recommendations {
            lines.push(String::new());
            lines.push(format!(
                "{} **{}**",
                Self::priority_marker(rec.priority),
                rec.action
            ));
            lines.push(format!("   - {}", rec.reason));
        }

        lines.join("\n")
    }

    /// Render and write the document to `path`.
    pub fn write(&self, report: &Report, path: &Path) -> Result<(), ReportError> {
        std::fs::write(path, self.render(report)).map_err(|e| ReportError::io(path, e))?;
        info!(path = %path.display(), "Markdown tree saved");
        Ok(())
    }
}

/// Append tree lines for the children of `node`; the node itself is not drawn.
fn render_children(node: &Node, prefix: &str, lines: &mut Vec<String>) {
    let count = node.children.len();
    for (i, child) in node.children.iter().enumerate() {
        let is_last = i + 1 == count;
        let connector = if is_last { "└── " } else { "├── " };
        let icon = if child.is_dir() { "📁 " } else { "📄 " };
        lines.push(format!("{prefix}{connector}{icon}{}", child.name));

        if child.is_dir() {
            let extension = if is_last { "    " } else { "│   " };
            render_children(child, &format!("{prefix}{extension}"), lines);
        }
    }
}

/// Format an integer with `,` thousands separators.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    digits
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or_default())
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_render_children_connectors() {
        let mut src = Node::new_directory("src", "src", 1);
        src.children.push(Node::new_file("a.ts", "src/a.ts", 2, 1, 0));
        src.children.push(Node::new_file("b.ts", "src/b.ts", 2, 1, 0));
        let mut root = Node::new_directory("project", "", 0);
        root.children.push(src);
        root.children.push(Node::new_file("README.md", "README.md", 1, 1, 0));

        let mut lines = Vec::new();
        render_children(&root, "", &mut lines);
        assert_eq!(
            lines,
            vec![
                "├── 📁 src",
                "│   ├── 📄 a.ts",
                "│   └── 📄 b.ts",
                "└── 📄 README.md",
            ]
        );
    }
}

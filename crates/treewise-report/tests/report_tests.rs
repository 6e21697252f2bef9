use chrono::Local;
use tempfile::TempDir;
use treewise_analyze::{
    DuplicateReport, Issue, Node, Report, Severity, StatsAggregator, generate_recommendations,
};
use treewise_report::{MarkdownRenderer, ReportError, read_json, write_json};

fn sample_report(issues: Vec<Issue>) -> Report {
    let mut app = Node::new_directory("app", "app", 1);
    app.children
        .push(Node::new_file("page.tsx", "app/page.tsx", 2, 2048, 1500));
    let mut root = Node::new_directory("figdream", "", 0);
    root.children.push(app);
    root.children
        .push(Node::new_file("package.json", "package.json", 1, 512, 40));

    Report {
        root: "/work/figdream".to_string(),
        generated_at: Local::now(),
        statistics: StatsAggregator::new().aggregate(&root).unwrap(),
        duplicates: DuplicateReport::default(),
        issues,
        recommendations: generate_recommendations(),
        structure: root,
    }
}

#[test]
fn test_markdown_sections() {
    let report = sample_report(vec![Issue {
        severity: Severity::Warning,
        message: "Missing /public directory for static assets".to_string(),
        recommendation: "Create /public directory".to_string(),
    }]);
    let doc = MarkdownRenderer::new().render(&report);

    assert!(doc.starts_with("# figdream Project Structure\n"));
    assert!(doc.contains("- **Total Files**: 2"));
    assert!(doc.contains("- **Total Lines of Code**: 1,540"));
    assert!(doc.contains("- `.tsx`: 1 files"));
    assert!(doc.contains("├── 📁 app\n│   └── 📄 page.tsx\n└── 📄 package.json"));
    assert!(!doc.contains("📁 figdream"));
    assert!(doc.contains("🟡 **Missing /public directory for static assets**"));
    assert!(doc.contains("   - Create /public directory"));
    assert!(doc.contains("## 💡 Recommendations"));
}

#[test]
fn test_markdown_without_issues() {
    let doc = MarkdownRenderer::new()
        .with_title("Layout")
        .render(&sample_report(Vec::new()));

    assert!(doc.starts_with("# Layout\n"));
    assert!(!doc.contains("Issues Found"));
}

#[test]
fn test_json_roundtrip_through_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("report.json");
    let report = sample_report(Vec::new());

    write_json(&report, &path).unwrap();
    let loaded = read_json(&path).unwrap();

    assert_eq!(loaded.structure, report.structure);
    assert_eq!(loaded.statistics, report.statistics);
    assert!(loaded.validate().is_ok());
}

#[test]
fn test_write_errors_surface() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("missing-dir").join("report.json");

    let err = write_json(&sample_report(Vec::new()), &path).unwrap_err();
    assert!(matches!(err, ReportError::Io { .. }));
}

#[test]
fn test_invalid_json_is_serialization_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("report.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(matches!(
        read_json(&path),
        Err(ReportError::Serialization(_))
    ));
}

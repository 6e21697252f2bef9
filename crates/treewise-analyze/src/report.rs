//! The combined analysis report and the pipeline producing it.

use chrono::{DateTime, Local};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use tracing::info;

use treewise_core::{Node, ProjectTree};

use crate::duplicates::{DuplicateConfig, DuplicateDetector, DuplicateReport};
use crate::error::{AnalyzeError, validate_tree};
use crate::issues::{Issue, IssueConfig, IssueIdentifier, Severity};
use crate::recommendations::{Recommendation, generate_recommendations};
use crate::stats::{Statistics, StatsAggregator, StatsConfig};

/// Complete output of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Scanned root directory.
    pub root: String,
    /// When the report was produced.
    pub generated_at: DateTime<Local>,
    pub statistics: Statistics,
    pub duplicates: DuplicateReport,
    pub issues: Vec<Issue>,
    pub recommendations: Vec<Recommendation>,
    /// The full scanned tree.
    pub structure: Node,
}

impl Report {
    /// Number of issues with the given severity.
    pub fn count_severity(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }

    /// Check the embedded tree, e.g. after loading a saved report.
    pub fn validate(&self) -> Result<(), AnalyzeError> {
        validate_tree(&self.structure)
    }
}

/// Configuration for the whole pipeline.
#[derive(Debug, Clone, Default, Builder)]
#[builder(setter(into), default)]
pub struct AnalyzeConfig {
    pub stats: StatsConfig,
    pub duplicates: DuplicateConfig,
    pub issues: IssueConfig,
}

impl AnalyzeConfig {
    /// Create a new config builder.
    pub fn builder() -> AnalyzeConfigBuilder {
        AnalyzeConfigBuilder::default()
    }
}

/// Runs every analysis over a scanned tree.
pub struct Analyzer {
    config: AnalyzeConfig,
}

impl Analyzer {
    /// Create a new analyzer with default config.
    pub fn new() -> Self {
        Self {
            config: AnalyzeConfig::default(),
        }
    }

    /// Create a new analyzer with custom config.
    pub fn with_config(config: AnalyzeConfig) -> Self {
        Self { config }
    }

    /// Aggregate, detect, identify and recommend, in that order.
    pub fn analyze(&self, tree: &ProjectTree) -> Result<Report, AnalyzeError> {
        info!("Analyzing statistics");
        let statistics =
            StatsAggregator::with_config(self.config.stats.clone()).aggregate(&tree.root)?;

        info!("Finding duplicates and issues");
        let duplicates =
            DuplicateDetector::with_config(self.config.duplicates.clone()).detect(&tree.root)?;
        let issues = IssueIdentifier::with_config(self.config.issues.clone()).identify(&tree.root);

        info!("Generating recommendations");
        let recommendations = generate_recommendations();

        Ok(Report {
            root: tree.root_path.display().to_string(),
            generated_at: Local::now(),
            statistics,
            duplicates,
            issues,
            recommendations,
            structure: tree.root.clone(),
        })
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

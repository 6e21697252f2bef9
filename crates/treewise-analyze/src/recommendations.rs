//! Static structure recommendations.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Recommendation priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// A structural recommendation, independent of scan results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub action: String,
    pub reason: String,
}

const RECOMMENDATIONS: &[(Priority, &str, &str)] = &[
    (
        Priority::High,
        "Consolidate all source code under /src directory",
        "Maintains clear separation between source code and configuration",
    ),
    (
        Priority::High,
        "Implement strict DAL pattern in /src/lib/dal",
        "Keeps all data access behind one auditable layer",
    ),
    (
        Priority::Medium,
        "Organize components by feature in /src/components/features",
        "Improves maintainability and discoverability",
    ),
    (
        Priority::Medium,
        "Create /public directory for static assets",
        "Standard Next.js structure for optimized asset serving",
    ),
    (
        Priority::Low,
        "Move scripts to /scripts directory",
        "Separates build/utility scripts from source code",
    ),
];

/// The fixed, priority-ordered recommendation list.
pub fn generate_recommendations() -> Vec<Recommendation> {
    RECOMMENDATIONS
        .iter()
        .map(|(priority, action, reason)| Recommendation {
            priority: *priority,
            action: (*action).to_string(),
            reason: (*reason).to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_ordered() {
        let recs = generate_recommendations();
        assert_eq!(recs.len(), 5);
        assert!(recs.windows(2).all(|w| (w[0].priority as u8) <= (w[1].priority as u8)));
        assert_eq!(recs, generate_recommendations());
    }
}

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `/project-highlights` 的增强结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectHighlights {
    /// 项目名 → 技能列表（原样透传）
    pub projects: Value,
    /// 项目名 → 量化成果（原样透传）
    pub impacts: Value,
    pub summary: HighlightsSummary,
    /// 后端返回的其他字段
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightsSummary {
    pub total_projects: usize,
    pub projects_with_impacts: usize,
    /// round(100 * projects_with_impacts / total_projects)，无项目时为 0
    pub impact_rate: u32,
}

impl HighlightsSummary {
    pub fn new(total_projects: usize, projects_with_impacts: usize) -> Self {
        let impact_rate = if total_projects == 0 {
            0
        } else {
            (projects_with_impacts as f64 * 100.0 / total_projects as f64).round() as u32
        };
        Self {
            total_projects,
            projects_with_impacts,
            impact_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn impact_rate_is_zero_without_projects() {
        let summary = HighlightsSummary::new(0, 0);
        assert_eq!(summary.impact_rate, 0);
    }

    #[test]
    fn impact_rate_rounds_to_nearest_percent() {
        assert_eq!(HighlightsSummary::new(3, 2).impact_rate, 67);
        assert_eq!(HighlightsSummary::new(3, 1).impact_rate, 33);
        assert_eq!(HighlightsSummary::new(8, 1).impact_rate, 13);
        assert_eq!(HighlightsSummary::new(4, 4).impact_rate, 100);
    }
}

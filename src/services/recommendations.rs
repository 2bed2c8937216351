//! 后端未给出建议时的兜底建议

use serde_json::{Map, Value};

use crate::services::normalizer::string_list;

/// 缺失技能建议中最多列出的技能数
const MAX_SUGGESTED_SKILLS: usize = 3;

/// 生成兜底建议
///
/// 仅在后端建议为空时调用。依次检查：
/// 1. 缺少量化成果的项目数量
/// 2. 前几个缺失技能
///
/// # 参数
/// - `projects_with_skills`: 项目名 → 技能
/// - `quantifiable_impacts`: 项目名 → 量化成果
/// - `missing_skills`: 后端给出的缺失技能（原始顺序）
/// - `job_title`: 岗位名称
pub fn fallback_recommendations(
    projects_with_skills: &Map<String, Value>,
    quantifiable_impacts: &Map<String, Value>,
    missing_skills: &[String],
    job_title: Option<&str>,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    let without_metrics = projects_with_skills
        .keys()
        .filter(|name| string_list(quantifiable_impacts.get(name.as_str())).is_empty())
        .count();

    if without_metrics > 0 {
        recommendations.push(format!(
            "{} of your projects lack quantifiable results. Consider adding metrics like performance improvements, user engagement, or technical achievements to make them more impactful.",
            without_metrics
        ));
    }

    if !missing_skills.is_empty() {
        let top = missing_skills
            .iter()
            .take(MAX_SUGGESTED_SKILLS)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        recommendations.push(format!(
            "Consider learning {} to strengthen your profile for {}. These skills are commonly required in the industry.",
            top,
            job_title.unwrap_or("this role")
        ));
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn counts_projects_without_metrics() {
        let projects = object(json!({"A": [], "B": [], "C": []}));
        let impacts = object(json!({"A": ["+30% speed"], "B": []}));

        let recs = fallback_recommendations(&projects, &impacts, &[], None);
        assert_eq!(recs.len(), 1);
        assert!(recs[0].starts_with("2 of your projects lack quantifiable results"));
    }

    #[test]
    fn names_at_most_three_missing_skills() {
        let missing: Vec<String> = ["Go", "Kafka", "K8s", "Terraform"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let recs = fallback_recommendations(&Map::new(), &Map::new(), &missing, Some("sre"));
        assert_eq!(recs.len(), 1);
        assert!(recs[0].starts_with("Consider learning Go, Kafka, K8s to strengthen"));
        assert!(recs[0].contains("for sre."));
        assert!(!recs[0].contains("Terraform"));
    }

    #[test]
    fn defaults_role_name() {
        let recs = fallback_recommendations(&Map::new(), &Map::new(), &["Go".to_string()], None);
        assert!(recs[0].contains("for this role."));
    }

    #[test]
    fn nothing_to_suggest() {
        let projects = object(json!({"A": ["Rust"]}));
        let impacts = object(json!({"A": ["cut latency 40%"]}));
        assert!(fallback_recommendations(&projects, &impacts, &[], None).is_empty());
    }
}

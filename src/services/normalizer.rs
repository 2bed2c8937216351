//! 响应归一化 - 业务能力层
//!
//! 把后端返回的松散 JSON 映射为固定结构的领域模型。
//!
//! 所有函数都是纯函数：
//! - 不修改输入
//! - 不会失败，缺失或类型不符的字段一律按"空"处理
//! - 同一输入总是得到同一输出

use indexmap::IndexMap;
use serde_json::{json, Map, Value};
use tracing::{debug, warn};

use crate::models::analysis::{
    AnalysisResult, AnalysisSummary, Project, RelevantProject, SkillsOnly,
    DEFAULT_RELEVANCE_LABEL, DEFAULT_SKILL_WEIGHT, PROJECT_SKILL_RELEVANCE,
};
use crate::models::highlights::{HighlightsSummary, ProjectHighlights};
use crate::services::recommendations::fallback_recommendations;

/// 平均项目相关度超过该值的部分计入项目加分
const PROJECT_BONUS_BASELINE: f64 = 50.0;
const PROJECT_BONUS_FACTOR: f64 = 0.5;

/// 技能数超过该值的部分计入多样性加分
const DIVERSITY_BONUS_BASELINE: usize = 10;
const DIVERSITY_BONUS_FACTOR: f64 = 0.2;

/// 归一化单个岗位的分析结果
///
/// # 参数
/// - `raw`: 后端返回的原始 JSON
///
/// # 返回
/// 返回结构固定的 AnalysisResult
pub fn normalize_analysis(raw: &Value) -> AnalysisResult {
    let job = present_or(raw.get("job_match"), json!({}));
    let skills = present_or(raw.get("skills"), json!([]));
    let projects_with_skills = present_or(raw.get("projects_with_skills"), json!({}));
    let quantifiable_impacts = present_or(raw.get("quantifiable_impacts"), json!({}));

    let project_map = as_object(&projects_with_skills);
    let impact_map = as_object(&quantifiable_impacts);
    let relevance_map = as_object(job.get("project_relevance").unwrap_or(&Value::Null));

    let projects = build_projects(&project_map, &impact_map, &relevance_map);
    let relevant_projects = build_relevant_projects(&project_map, &impact_map, &relevance_map);

    let job_title = job.get("job_title").and_then(Value::as_str);
    let missing = string_list(job.get("missing_skills"));

    let mut recommendations = string_list(raw.get("recommendations"));
    if recommendations.is_empty() {
        recommendations =
            fallback_recommendations(&project_map, &impact_map, &missing, job_title);
    }

    let skill_count = skills.as_array().map_or(0, Vec::len);

    let analysis = AnalysisSummary {
        total_skills_found: skill_count,
        total_projects: project_map.len(),
        relevant_projects: relevance_map.len(),
        skills_with_metrics: impact_map
            .values()
            .filter(|m| m.as_array().is_some_and(|a| !a.is_empty()))
            .count(),
        achieved_score: number(&job, "skill_match_score"),
        project_bonus: project_bonus(number(&job, "avg_project_relevance")),
        diversity_bonus: diversity_bonus(skill_count),
    };

    debug!(
        "归一化完成: score={}, 项目 {} 个, 相关项目 {} 个, 建议 {} 条",
        number(&job, "overall_relevance_score"),
        projects.len(),
        relevant_projects.len(),
        recommendations.len()
    );

    AnalysisResult {
        score: number(&job, "overall_relevance_score"),
        target_job: job_title.map(String::from),
        matched_skills: weighted(&string_list(job.get("matched_skills")), DEFAULT_SKILL_WEIGHT),
        missing_skills: weighted(&missing, DEFAULT_SKILL_WEIGHT),
        projects,
        relevant_projects,
        recommendations,
        analysis,
        skills,
        projects_with_skills,
        quantifiable_impacts,
        job_match: job,
    }
}

/// 归一化多岗位结果：岗位名 → 单岗位原始结果，键保持后端返回的原样
pub fn normalize_multiple(raw: &Value) -> IndexMap<String, AnalysisResult> {
    match raw.as_object() {
        Some(jobs) => jobs
            .iter()
            .map(|(job, payload)| (job.clone(), normalize_analysis(payload)))
            .collect(),
        None => {
            warn!("⚠️ 多岗位分析结果不是对象，按空结果处理");
            IndexMap::new()
        }
    }
}

/// 为项目亮点结果补充汇总计数
pub fn enrich_highlights(raw: Value) -> ProjectHighlights {
    let mut extra = match raw {
        Value::Object(map) => map,
        _ => Map::new(),
    };

    let projects = present_or(extra.shift_remove("projects").as_ref(), json!({}));
    let impacts = present_or(extra.shift_remove("impacts").as_ref(), json!({}));
    extra.shift_remove("summary");

    let total_projects = projects.as_object().map_or(0, Map::len);
    let projects_with_impacts = impacts
        .as_object()
        .map_or(0, |m| m.values().filter(|v| has_impact(v)).count());

    ProjectHighlights {
        summary: HighlightsSummary::new(total_projects, projects_with_impacts),
        projects,
        impacts,
        extra,
    }
}

/// 解析 `/skills-only` 的结果
pub fn parse_skills_only(raw: &Value) -> SkillsOnly {
    let skills = string_list(raw.get("skills"));
    let total_skills = raw
        .get("total_skills")
        .and_then(Value::as_u64)
        .map_or(skills.len(), |n| n as usize);

    SkillsOnly {
        skills,
        total_skills,
    }
}

/// max(0, avg_relevance - 50) * 0.5
pub fn project_bonus(avg_relevance: f64) -> f64 {
    (avg_relevance - PROJECT_BONUS_BASELINE).max(0.0) * PROJECT_BONUS_FACTOR
}

/// max(0, skill_count - 10) * 0.2
pub fn diversity_bonus(skill_count: usize) -> f64 {
    skill_count.saturating_sub(DIVERSITY_BONUS_BASELINE) as f64 * DIVERSITY_BONUS_FACTOR
}

// ========== 辅助函数 ==========

fn build_projects(
    projects_with_skills: &Map<String, Value>,
    impacts: &Map<String, Value>,
    relevance: &Map<String, Value>,
) -> Vec<Project> {
    projects_with_skills
        .iter()
        .map(|(name, skills)| {
            let skills = string_list(Some(skills));
            let metrics = string_list(impacts.get(name));
            let skill_relevance = weighted(&skills, PROJECT_SKILL_RELEVANCE);

            Project {
                name: name.clone(),
                skills_count: skills.len(),
                metrics_count: metrics.len(),
                has_quantifiable_results: !metrics.is_empty(),
                effectiveness_indicators: Vec::new(),
                relevance_score: relevance.get(name).map_or(0.0, |r| number(r, "relevance_score")),
                description: String::new(),
                skill_relevance,
                skills,
                metrics,
            }
        })
        .collect()
}

fn build_relevant_projects(
    projects_with_skills: &Map<String, Value>,
    impacts: &Map<String, Value>,
    relevance: &Map<String, Value>,
) -> Vec<RelevantProject> {
    relevance
        .iter()
        .map(|(name, data)| RelevantProject {
            name: name.clone(),
            skills: string_list(projects_with_skills.get(name)),
            metrics: string_list(impacts.get(name)),
            relevance_score: number(data, "relevance_score"),
            relevance_label: data
                .get("relevance_label")
                .and_then(Value::as_str)
                .filter(|l| !l.is_empty())
                .unwrap_or(DEFAULT_RELEVANCE_LABEL)
                .to_string(),
        })
        .collect()
}

/// 将 JSON 数组转换为字符串列表
///
/// 非数组视为空；数字和布尔值转为文本，其余元素跳过
pub(crate) fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.clone()),
                    Value::Number(n) => Some(n.to_string()),
                    Value::Bool(b) => Some(b.to_string()),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default()
}

/// 列表 → 有序映射，每个键赋同一权重，重复项只保留首次出现的位置
fn weighted(items: &[String], weight: u32) -> IndexMap<String, u32> {
    items.iter().map(|item| (item.clone(), weight)).collect()
}

/// 缺失或为 null 时使用默认值，否则原样克隆
fn present_or(value: Option<&Value>, default: Value) -> Value {
    match value {
        Some(v) if !v.is_null() => v.clone(),
        _ => default,
    }
}

fn as_object(value: &Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap_or_default()
}

fn number(value: &Value, key: &str) -> f64 {
    value.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

fn has_impact(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Array(items) => !items.is_empty(),
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

//! 分析结果领域模型
//!
//! 后端返回的 JSON 结构松散且会演进，这里定义的是归一化之后的固定结构，
//! 供所有下游调用方使用。

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 匹配/缺失技能的统一权重
pub const DEFAULT_SKILL_WEIGHT: u32 = 5;

/// 项目内每个技能的相关度
pub const PROJECT_SKILL_RELEVANCE: u32 = 1;

/// 相关度标签缺失时的默认值
pub const DEFAULT_RELEVANCE_LABEL: &str = "Not Relevant";

/// 单次分析的归一化结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// 总体相关度 (0-100)，缺失时为 0
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_job: Option<String>,
    /// 技能名 → 权重，顺序与后端数组一致，重复项合并
    pub matched_skills: IndexMap<String, u32>,
    pub missing_skills: IndexMap<String, u32>,
    /// 按 `projects_with_skills` 的键生成
    pub projects: Vec<Project>,
    /// 按 `job_match.project_relevance` 的键独立生成，与 `projects` 不做对齐
    pub relevant_projects: Vec<RelevantProject>,
    pub recommendations: Vec<String>,
    pub analysis: AnalysisSummary,

    // 原始数据透传
    pub skills: Value,
    pub projects_with_skills: Value,
    pub quantifiable_impacts: Value,
    pub job_match: Value,
}

/// 简历中的单个项目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub skills: Vec<String>,
    pub skills_count: usize,
    pub metrics: Vec<String>,
    pub metrics_count: usize,
    /// 当且仅当 metrics 非空
    pub has_quantifiable_results: bool,
    pub effectiveness_indicators: Vec<Value>,
    pub relevance_score: f64,
    pub description: String,
    pub skill_relevance: IndexMap<String, u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelevantProject {
    pub name: String,
    pub skills: Vec<String>,
    pub metrics: Vec<String>,
    pub relevance_score: f64,
    pub relevance_label: String,
}

/// 汇总计数
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub total_skills_found: usize,
    pub total_projects: usize,
    pub relevant_projects: usize,
    /// 至少有一条量化指标的项目数
    pub skills_with_metrics: usize,
    pub achieved_score: f64,
    /// max(0, avg_project_relevance - 50) * 0.5
    pub project_bonus: f64,
    /// max(0, skill_count - 10) * 0.2
    pub diversity_bonus: f64,
}

/// `/skills-only` 的结果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillsOnly {
    pub skills: Vec<String>,
    pub total_skills: usize,
}

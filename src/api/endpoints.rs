//! 后端接口路径

pub const ANALYZE: &str = "/analyze";
pub const ANALYZE_MULTIPLE_JOBS: &str = "/analyze-multiple-jobs";
pub const PROJECT_HIGHLIGHTS: &str = "/project-highlights";
pub const SKILLS_ONLY: &str = "/skills-only";
pub const HEALTH: &str = "/";
pub const SERVICE_HEALTH: &str = "/health";
pub const TEST_ANALYZER: &str = "/debug/test-analyzer";

/// 拼接基础地址与接口路径，容忍基础地址末尾的 `/`
pub fn url(base_url: &str, endpoint: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), endpoint)
}

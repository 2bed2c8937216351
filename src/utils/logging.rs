/// 日志工具模块
///
/// 提供日志初始化以及格式化输出的辅助函数
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::models::AnalysisResult;

/// 初始化日志
///
/// 优先使用 `RUST_LOG`，否则 verbose 时为 debug，默认 info。
/// 重复调用不会报错（测试中会多次初始化）。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
    {
        debug!("日志系统已初始化，沿用现有订阅者: {}", e);
    }
}

/// 记录程序启动信息
///
/// # 参数
/// - `api_base_url`: 后端地址
/// - `document_path`: 待分析文件
pub fn log_startup(api_base_url: &str, document_path: Option<&str>) {
    info!("{}", "=".repeat(60));
    info!(
        "🚀 简历分析客户端启动 - {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("🌐 后端地址: {}", api_base_url);
    info!("📄 待分析文件: {}", document_path.unwrap_or("未配置"));
    info!("{}", "=".repeat(60));
}

/// 打印分析结果摘要
pub fn log_analysis_summary(result: &AnalysisResult) {
    info!("\n{}", "─".repeat(60));
    info!("📊 分析结果");
    if let Some(job) = &result.target_job {
        info!("目标岗位: {}", job);
    }
    info!("总体得分: {}", result.score);
    info!(
        "技能: 匹配 {} 个, 缺失 {} 个",
        result.matched_skills.len(),
        result.missing_skills.len()
    );
    info!(
        "项目: 共 {} 个, 有量化成果 {} 个",
        result.analysis.total_projects, result.analysis.skills_with_metrics
    );
    for (i, rec) in result.recommendations.iter().enumerate() {
        info!("💡 建议 {}: {}", i + 1, truncate_text(rec, 120));
    }
    info!("{}", "─".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度（按字符计）
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

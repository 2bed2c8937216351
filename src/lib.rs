//! # Resume Analyzer Client
//!
//! 简历分析后端的 Rust 客户端
//!
//! ## 架构设计
//!
//! 本系统分为四层：
//!
//! ### ① 接口约定层（API）
//! - `api/endpoints` - 后端接口路径
//! - `api/form` - 各接口的 multipart 表单字段
//!
//! ### ② 客户端层（Clients）
//! - `AnalyzerClient` - 发起请求、施加超时、分类错误
//! - `handle_api_response` - 所有接口共用的响应处理策略
//!
//! ### ③ 业务能力层（Services）
//! - `normalizer` - 把松散的后端 JSON 归一化为固定结构，纯函数，永不失败
//! - `recommendations` - 后端未给出建议时的兜底建议
//!
//! ### ④ 领域模型层（Models）
//! - `AnalysisResult` / `ProjectHighlights` / `SkillsOnly` / `Document`
//!
//! ## 模块结构

pub mod api;
pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use app::App;
pub use clients::{AnalyzerClient, Timeouts};
pub use config::Config;
pub use error::{ApiError, AppError, AppResult, ConfigError, FileError};
pub use models::{
    AnalysisResult, AnalysisSummary, Document, HighlightsSummary, Project, ProjectHighlights,
    RelevantProject, SkillsOnly,
};
pub use services::{enrich_highlights, normalize_analysis, normalize_multiple};

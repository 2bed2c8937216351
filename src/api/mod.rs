//! API 模块
//!
//! 负责与分析后端约定的接口路径和请求表单

pub mod endpoints;
pub mod form;

// 重新导出常用类型
pub use form::FormFields;

use std::time::Duration;

use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 后端 API 调用错误
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

impl AppError {
    /// 是否为请求超时
    ///
    /// 调用方可据此提示用户换一个更小的文件后重试
    pub fn is_timeout(&self) -> bool {
        matches!(self, AppError::Api(e) if e.is_timeout())
    }
}

/// 后端 API 调用错误
///
/// 四类结果：超时、非成功状态码、响应体无法解析、底层网络失败。
/// 均不会在客户端内部自动重试。
#[derive(Debug, Error)]
pub enum ApiError {
    /// 请求在限定时间内未得到响应
    #[error("请求超时 ({endpoint}): 超过 {timeout:?} 未响应，请尝试更小的文件后重试")]
    Timeout { endpoint: String, timeout: Duration },

    /// 后端返回非成功状态码
    #[error(
        "HTTP错误 ({endpoint}): 状态码 {status} {status_text}{}",
        detail_suffix(.detail)
    )]
    Transport {
        endpoint: String,
        status: u16,
        status_text: String,
        /// 从错误响应体中尽力提取的信息（JSON 的 `error` 字段优先，其次为原始文本）
        detail: Option<String>,
    },

    /// 状态码成功但响应体不是合法 JSON
    #[error("服务端返回了无效的 JSON 响应 ({endpoint}): {source}")]
    InvalidResponse {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    /// 连接失败等底层网络错误
    #[error("网络请求失败 ({endpoint}): {source}")]
    Network {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// 构建 HTTP 客户端或请求体失败
    #[error("请求构建失败: {source}")]
    Build {
        #[source]
        source: reqwest::Error,
    },
}

impl ApiError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Timeout { .. })
    }

    /// 错误对应的接口路径（构建失败时为空）
    pub fn endpoint(&self) -> &str {
        match self {
            ApiError::Timeout { endpoint, .. }
            | ApiError::Transport { endpoint, .. }
            | ApiError::InvalidResponse { endpoint, .. }
            | ApiError::Network { endpoint, .. } => endpoint,
            ApiError::Build { .. } => "",
        }
    }
}

fn detail_suffix(detail: &Option<String>) -> String {
    match detail {
        Some(d) => format!(" - {}", d),
        None => String::new(),
    }
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 文件不存在
    #[error("文件不存在: {path}")]
    NotFound { path: String },

    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },

    /// 配置项取值不合法
    #[error("配置项 {field} 不合法: {reason}")]
    InvalidValue { field: String, reason: String },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建配置项不合法错误
    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        AppError::Config(ConfigError::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_message_includes_detail_when_present() {
        let err = ApiError::Transport {
            endpoint: "/analyze".to_string(),
            status: 400,
            status_text: "Bad Request".to_string(),
            detail: Some("No file uploaded".to_string()),
        };
        let msg = err.to_string();
        assert!(msg.contains("400 Bad Request"));
        assert!(msg.ends_with(" - No file uploaded"));
    }

    #[test]
    fn transport_message_without_detail_has_no_suffix() {
        let err = ApiError::Transport {
            endpoint: "/".to_string(),
            status: 503,
            status_text: "Service Unavailable".to_string(),
            detail: None,
        };
        assert!(err.to_string().ends_with("503 Service Unavailable"));
    }

    #[test]
    fn timeout_is_distinguishable() {
        let err: AppError = ApiError::Timeout {
            endpoint: "/analyze".to_string(),
            timeout: Duration::from_secs(300),
        }
        .into();
        assert!(err.is_timeout());
        assert!(!AppError::invalid_config("api_base_url", "empty").is_timeout());
    }

    #[test]
    fn endpoint_is_reported_for_request_errors() {
        let err = ApiError::Timeout {
            endpoint: "/project-highlights".to_string(),
            timeout: Duration::from_secs(45),
        };
        assert_eq!(err.endpoint(), "/project-highlights");

        let err = ApiError::Transport {
            endpoint: "/health".to_string(),
            status: 500,
            status_text: "Internal Server Error".to_string(),
            detail: None,
        };
        assert_eq!(err.endpoint(), "/health");
    }
}

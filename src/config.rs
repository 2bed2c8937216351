use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{AppError, AppResult, ConfigError, FileError};

/// 默认配置文件路径（可通过 `RESUME_CLIENT_CONFIG` 覆盖）
pub const DEFAULT_CONFIG_FILE: &str = "resume_client.toml";

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 分析后端的基础地址
    pub api_base_url: String,
    /// 单岗位分析超时（秒）
    pub analyze_timeout_secs: u64,
    /// 多岗位分析超时（秒），一次往返服务所有岗位，不按岗位数放大
    pub multi_job_timeout_secs: u64,
    /// 项目亮点超时（秒）
    pub highlights_timeout_secs: u64,
    // --- 运行参数 ---
    /// 待分析的简历文件
    pub document_path: Option<String>,
    pub target_job: Option<String>,
    pub job_skills: Vec<String>,
    pub job_description: Option<String>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 分析结果输出文件
    pub output_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000".to_string(),
            analyze_timeout_secs: 300,
            multi_job_timeout_secs: 90,
            highlights_timeout_secs: 45,
            document_path: None,
            target_job: None,
            job_skills: Vec::new(),
            job_description: None,
            verbose_logging: false,
            output_file: "analysis.json".to_string(),
        }
    }
}

impl Config {
    /// 加载配置：先读取 TOML 文件（不存在则使用默认值），再应用环境变量覆盖
    pub fn load() -> AppResult<Self> {
        let path =
            std::env::var("RESUME_CLIENT_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.into());

        let base = if Path::new(&path).exists() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };

        let config = base.with_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// 从 TOML 文件读取配置
    pub fn from_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;
        Self::from_toml_str(&content, &path.display().to_string())
    }

    /// 解析 TOML 内容，`origin` 仅用于错误信息
    pub fn from_toml_str(content: &str, origin: &str) -> AppResult<Self> {
        toml::from_str(content).map_err(|source| {
            AppError::File(FileError::TomlParseFailed {
                path: origin.to_string(),
                source,
            })
        })
    }

    fn with_env_overrides(mut self) -> AppResult<Self> {
        if let Ok(v) = std::env::var("API_BASE_URL") {
            self.api_base_url = v;
        }
        if let Some(v) = env_parse("ANALYZE_TIMEOUT_SECS", "u64")? {
            self.analyze_timeout_secs = v;
        }
        if let Some(v) = env_parse("MULTI_JOB_TIMEOUT_SECS", "u64")? {
            self.multi_job_timeout_secs = v;
        }
        if let Some(v) = env_parse("HIGHLIGHTS_TIMEOUT_SECS", "u64")? {
            self.highlights_timeout_secs = v;
        }
        if let Ok(v) = std::env::var("DOCUMENT_PATH") {
            self.document_path = Some(v);
        }
        if let Ok(v) = std::env::var("TARGET_JOB") {
            self.target_job = Some(v);
        }
        if let Ok(v) = std::env::var("JOB_SKILLS") {
            self.job_skills = split_list(&v);
        }
        if let Ok(v) = std::env::var("JOB_DESCRIPTION") {
            self.job_description = Some(v);
        }
        if let Some(v) = env_parse("VERBOSE_LOGGING", "bool")? {
            self.verbose_logging = v;
        }
        if let Ok(v) = std::env::var("OUTPUT_FILE") {
            self.output_file = v;
        }
        Ok(self)
    }

    /// 校验配置
    pub fn validate(&self) -> AppResult<()> {
        if self.api_base_url.trim().is_empty() {
            return Err(AppError::invalid_config("api_base_url", "不能为空"));
        }
        let timeouts = [
            ("analyze_timeout_secs", self.analyze_timeout_secs),
            ("multi_job_timeout_secs", self.multi_job_timeout_secs),
            ("highlights_timeout_secs", self.highlights_timeout_secs),
        ];
        for (field, secs) in timeouts {
            if secs == 0 {
                return Err(AppError::invalid_config(field, "必须大于 0"));
            }
        }
        Ok(())
    }

    pub fn analyze_timeout(&self) -> Duration {
        Duration::from_secs(self.analyze_timeout_secs)
    }

    pub fn multi_job_timeout(&self) -> Duration {
        Duration::from_secs(self.multi_job_timeout_secs)
    }

    pub fn highlights_timeout(&self) -> Duration {
        Duration::from_secs(self.highlights_timeout_secs)
    }
}

fn env_parse<T: FromStr>(var_name: &str, expected_type: &str) -> AppResult<Option<T>> {
    match std::env::var(var_name) {
        Ok(value) => value.trim().parse::<T>().map(Some).map_err(|_| {
            AppError::Config(ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            })
        }),
        Err(_) => Ok(None),
    }
}

/// 逗号分隔列表，去除空白项
fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_backend_budgets() {
        let config = Config::default();
        assert_eq!(config.analyze_timeout(), Duration::from_secs(300));
        assert_eq!(config.multi_job_timeout(), Duration::from_secs(90));
        assert_eq!(config.highlights_timeout(), Duration::from_secs(45));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn toml_overrides_only_given_fields() {
        let config = Config::from_toml_str(
            r#"
            api_base_url = "https://resume.example.com"
            highlights_timeout_secs = 10
            job_skills = ["Rust", "SQL"]
            "#,
            "inline",
        )
        .unwrap();

        assert_eq!(config.api_base_url, "https://resume.example.com");
        assert_eq!(config.highlights_timeout_secs, 10);
        assert_eq!(config.analyze_timeout_secs, 300);
        assert_eq!(config.job_skills, vec!["Rust", "SQL"]);
        assert_eq!(config.output_file, "analysis.json");
    }

    #[test]
    fn malformed_toml_reports_origin() {
        let err = Config::from_toml_str("api_base_url = ", "broken.toml").unwrap_err();
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let config = Config {
            multi_job_timeout_secs: 0,
            ..Config::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("multi_job_timeout_secs"));
    }

    #[test]
    fn empty_base_url_is_rejected() {
        let config = Config {
            api_base_url: "  ".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn split_list_drops_blank_entries() {
        assert_eq!(split_list("Rust, Go,,  ,SQL"), vec!["Rust", "Go", "SQL"]);
    }
}

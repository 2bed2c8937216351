use crate::clients::AnalyzerClient;
use crate::config::Config;
use crate::error::AppError;
use crate::models::{load_document, AnalysisResult};
use crate::utils::logging::{log_analysis_summary, log_startup};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{error, info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    client: AnalyzerClient,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        log_startup(&config.api_base_url, config.document_path.as_deref());

        let client = AnalyzerClient::new(&config).context("无法创建分析后端客户端")?;

        Ok(Self { config, client })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<()> {
        self.probe_backend().await;

        let Some(document_path) = self.config.document_path.as_deref() else {
            warn!("⚠️ 未配置待分析文件 (DOCUMENT_PATH)，程序结束");
            return Ok(());
        };

        let result = match self.analyze(document_path).await {
            Ok(result) => result,
            Err(AppError::Api(e)) if e.is_timeout() => {
                error!("❌ 分析超时 ({})，请尝试更小的文件后重试: {}", e.endpoint(), e);
                return Err(AppError::Api(e).into());
            }
            Err(AppError::Api(e)) => {
                error!("❌ 后端调用失败 ({}): {}", e.endpoint(), e);
                return Err(AppError::Api(e).into());
            }
            Err(e) => {
                error!("❌ 简历分析失败: {}", e);
                return Err(e.into());
            }
        };

        log_analysis_summary(&result);
        self.write_output(&result).await?;

        Ok(())
    }

    /// 同时探测健康检查和分析器诊断接口，失败只记录不中断
    async fn probe_backend(&self) {
        let (health, analyzer) =
            futures::join!(self.client.check_health(), self.client.test_analyzer());

        match health {
            Ok(body) => info!("✓ 后端在线: {}", body),
            Err(e) => warn!("⚠️ 后端健康检查失败: {}", e),
        }
        match analyzer {
            Ok(body) => info!("✓ 分析器诊断: {}", body),
            Err(e) => warn!("⚠️ 分析器诊断失败: {}", e),
        }
    }

    /// 加载文件并执行单岗位分析
    async fn analyze(&self, document_path: &str) -> Result<AnalysisResult, AppError> {
        let document = load_document(Path::new(document_path)).await?;

        self.client
            .analyze_single(
                &document,
                self.config.target_job.as_deref(),
                &self.config.job_skills,
                self.config.job_description.as_deref(),
            )
            .await
    }

    /// 将归一化结果写入输出文件
    async fn write_output(&self, result: &AnalysisResult) -> Result<()> {
        let json = serde_json::to_string_pretty(result).context("无法序列化分析结果")?;

        tokio::fs::write(&self.config.output_file, json)
            .await
            .map_err(|e| AppError::file_write_failed(self.config.output_file.clone(), e))?;

        info!("\n分析结果已保存至: {}", self.config.output_file);
        Ok(())
    }
}

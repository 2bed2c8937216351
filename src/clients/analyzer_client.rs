/// 简历分析后端客户端
///
/// 封装所有与分析后端相关的调用逻辑：构建 multipart 请求、按接口施加超时、
/// 统一分类响应，并把原始结果交给归一化层。
use std::time::Duration;

use indexmap::IndexMap;
use reqwest::header::ACCEPT;
use reqwest::multipart::Form;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::api::{endpoints, form};
use crate::clients::response::handle_api_response;
use crate::config::Config;
use crate::error::{ApiError, AppResult};
use crate::models::{AnalysisResult, Document, ProjectHighlights, SkillsOnly};
use crate::services::normalizer;

/// 各接口的超时时间
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    /// `/analyze`
    pub analyze: Duration,
    /// `/analyze-multiple-jobs`
    pub multi_job: Duration,
    /// `/project-highlights` 和 `/skills-only`
    pub highlights: Duration,
}

impl Timeouts {
    pub fn from_config(config: &Config) -> Self {
        Self {
            analyze: config.analyze_timeout(),
            multi_job: config.multi_job_timeout(),
            highlights: config.highlights_timeout(),
        }
    }
}

impl Default for Timeouts {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// 分析后端客户端
///
/// 不持有可变状态，可自由克隆并在多个任务间并发使用
#[derive(Debug, Clone)]
pub struct AnalyzerClient {
    http: Client,
    base_url: String,
    timeouts: Timeouts,
}

impl AnalyzerClient {
    /// 创建新的客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = Client::builder()
            .build()
            .map_err(|source| ApiError::Build { source })?;

        Ok(Self {
            http,
            base_url: config.api_base_url.clone(),
            timeouts: Timeouts::from_config(config),
        })
    }

    /// 使用自定义超时
    pub fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// 后端基础地址
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeouts(&self) -> Timeouts {
        self.timeouts
    }

    /// 单岗位分析
    ///
    /// # 参数
    /// - `document`: 简历文件
    /// - `target_job`: 目标岗位（可选）
    /// - `job_skills`: 岗位要求的技能
    /// - `job_description`: 岗位描述（可选）
    ///
    /// # 返回
    /// 返回归一化后的分析结果
    pub async fn analyze_single(
        &self,
        document: &Document,
        target_job: Option<&str>,
        job_skills: &[String],
        job_description: Option<&str>,
    ) -> AppResult<AnalysisResult> {
        info!(
            "📤 正在分析简历: {} ({} 字节), 目标岗位: {}",
            document.file_name,
            document.len(),
            target_job.unwrap_or("未指定")
        );

        let fields = form::analyze_fields(target_job, job_skills, job_description);
        debug!("表单字段: {:?}", fields.names());

        let raw = self
            .post_form(endpoints::ANALYZE, fields.into_form(document)?, self.timeouts.analyze)
            .await?;

        let result = normalizer::normalize_analysis(&raw);
        info!("✓ 分析完成，总体得分: {}", result.score);
        Ok(result)
    }

    /// 多岗位分析
    ///
    /// 一次请求携带文件和所有岗位的字段，结果中每个岗位独立归一化。
    ///
    /// # 参数
    /// - `document`: 简历文件
    /// - `jobs_with_skills`: 岗位 → 技能列表
    /// - `job_descriptions`: 岗位 → 描述（可选）
    ///
    /// # 返回
    /// 返回岗位 → 分析结果，键与后端返回的一致
    pub async fn analyze_multiple(
        &self,
        document: &Document,
        jobs_with_skills: &IndexMap<String, Vec<String>>,
        job_descriptions: Option<&IndexMap<String, String>>,
    ) -> AppResult<IndexMap<String, AnalysisResult>> {
        info!(
            "📤 正在进行多岗位分析: {} 个岗位, 文件 {}",
            jobs_with_skills.len(),
            document.file_name
        );

        let fields = form::multiple_jobs_fields(jobs_with_skills, job_descriptions);
        debug!("表单字段: {:?}", fields.names());

        let raw = self
            .post_form(
                endpoints::ANALYZE_MULTIPLE_JOBS,
                fields.into_form(document)?,
                self.timeouts.multi_job,
            )
            .await?;

        let results = normalizer::normalize_multiple(&raw);
        info!("✓ 多岗位分析完成，返回 {} 个岗位结果", results.len());
        Ok(results)
    }

    /// 获取项目亮点，并补充项目数、有量化成果的项目数和占比
    pub async fn get_highlights(
        &self,
        document: &Document,
        target_job: &str,
        job_skills: &[String],
        job_description: Option<&str>,
    ) -> AppResult<ProjectHighlights> {
        info!("📤 正在获取项目亮点: 目标岗位 {}", target_job);

        let fields = form::highlights_fields(target_job, job_skills, job_description);
        let raw = self
            .post_form(
                endpoints::PROJECT_HIGHLIGHTS,
                fields.into_form(document)?,
                self.timeouts.highlights,
            )
            .await?;

        let highlights = normalizer::enrich_highlights(raw);
        info!(
            "✓ 项目亮点: {}/{} 个项目有量化成果 ({}%)",
            highlights.summary.projects_with_impacts,
            highlights.summary.total_projects,
            highlights.summary.impact_rate
        );
        Ok(highlights)
    }

    /// 仅提取技能
    pub async fn extract_skills(&self, document: &Document) -> AppResult<SkillsOnly> {
        let raw = self
            .post_form(
                endpoints::SKILLS_ONLY,
                form::FormFields::new().into_form(document)?,
                self.timeouts.highlights,
            )
            .await?;

        Ok(normalizer::parse_skills_only(&raw))
    }

    /// 健康检查 (`GET /`)
    pub async fn check_health(&self) -> AppResult<Value> {
        Ok(self.get_json(endpoints::HEALTH).await?)
    }

    /// 后端详细健康检查 (`GET /health`)
    pub async fn check_service_health(&self) -> AppResult<Value> {
        Ok(self.get_json(endpoints::SERVICE_HEALTH).await?)
    }

    /// 分析器诊断 (`GET /debug/test-analyzer`)
    pub async fn test_analyzer(&self) -> AppResult<Value> {
        Ok(self.get_json(endpoints::TEST_ANALYZER).await?)
    }

    // ========== 辅助方法 ==========

    async fn post_form(
        &self,
        endpoint: &str,
        form: Form,
        timeout: Duration,
    ) -> Result<Value, ApiError> {
        let request = self
            .http
            .post(endpoints::url(&self.base_url, endpoint))
            .multipart(form);

        self.execute(request, endpoint, Some(timeout)).await
    }

    /// GET 请求不设置超时，沿用 HTTP 客户端的默认行为
    async fn get_json(&self, endpoint: &str) -> Result<Value, ApiError> {
        let request = self.http.get(endpoints::url(&self.base_url, endpoint));
        self.execute(request, endpoint, None).await
    }

    /// 发送请求并处理响应
    ///
    /// 有超时时，计时器覆盖发送请求和读取响应体的全过程；先到期则取消请求并返回
    /// `ApiError::Timeout`，请求完成后计时器随即被丢弃。
    async fn execute(
        &self,
        request: RequestBuilder,
        endpoint: &str,
        timeout: Option<Duration>,
    ) -> Result<Value, ApiError> {
        let exchange = async {
            let response = request
                .header(ACCEPT, "application/json")
                .send()
                .await
                .map_err(|source| {
                    warn!("⚠️ 网络请求失败 ({}): {}", endpoint, source);
                    ApiError::Network {
                        endpoint: endpoint.to_string(),
                        source,
                    }
                })?;

            handle_api_response(response, endpoint).await
        };

        let Some(limit) = timeout else {
            return exchange.await;
        };

        match tokio::time::timeout(limit, exchange).await {
            Ok(result) => result,
            Err(_) => {
                warn!("⚠️ 请求超时 ({}): 超过 {:?}", endpoint, limit);
                Err(ApiError::Timeout {
                    endpoint: endpoint.to_string(),
                    timeout: limit,
                })
            }
        }
    }
}

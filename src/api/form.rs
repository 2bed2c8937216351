//! 请求表单构建
//!
//! 文本字段先构建为 `FormFields`（便于测试），发送前再与文件合成 multipart 表单。

use indexmap::IndexMap;
use reqwest::multipart::{Form, Part};

use crate::error::ApiError;
use crate::models::Document;

/// 表单文本字段（不含文件部分），保持追加顺序
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    fields: Vec<(String, String)>,
}

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push((name.into(), value.into()));
    }

    /// 按名称查找第一个字段值
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn names(&self) -> Vec<&str> {
        self.fields.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// 合成 multipart 表单，`file` 字段位于最前
    ///
    /// 字段名原样发送（如 `data scientist_skills`），不做百分号编码
    pub fn into_form(self, document: &Document) -> Result<Form, ApiError> {
        let part = Part::bytes(document.bytes.clone())
            .file_name(document.file_name.clone())
            .mime_str(&document.mime_type)
            .map_err(|source| ApiError::Build { source })?;

        let form = self.fields.into_iter().fold(
            Form::new().percent_encode_noop().part("file", part),
            |form, (name, value)| form.text(name, value),
        );

        Ok(form)
    }
}

/// `/analyze` 的表单字段
///
/// # 参数
/// - `target_job`: 岗位名称，发送前转为小写，为空时不发送
/// - `job_skills`: 技能列表，非空时以逗号连接
/// - `job_description`: 岗位描述，去除首尾空白后为空则不发送
pub fn analyze_fields(
    target_job: Option<&str>,
    job_skills: &[String],
    job_description: Option<&str>,
) -> FormFields {
    let mut fields = FormFields::new();

    if let Some(job) = target_job.filter(|j| !j.is_empty()) {
        fields.push("target_job", job.to_lowercase());
    }

    if !job_skills.is_empty() {
        fields.push("job_skills", job_skills.join(","));
    }

    push_description(&mut fields, "job_description", job_description);

    fields
}

/// `/analyze-multiple-jobs` 的表单字段
///
/// 每个岗位生成 `<小写岗位>_skills`，有描述时再生成 `<小写岗位>_description`
pub fn multiple_jobs_fields(
    jobs_with_skills: &IndexMap<String, Vec<String>>,
    job_descriptions: Option<&IndexMap<String, String>>,
) -> FormFields {
    let mut fields = FormFields::new();

    let target_jobs = jobs_with_skills
        .keys()
        .map(|job| job.to_lowercase())
        .collect::<Vec<_>>()
        .join(",");
    fields.push("target_jobs", target_jobs);

    for (job, skills) in jobs_with_skills {
        let job_key = job.to_lowercase();
        fields.push(format!("{}_skills", job_key), skills.join(","));

        if let Some(description) = job_descriptions
            .and_then(|d| d.get(job))
            .filter(|d| !d.is_empty())
        {
            fields.push(format!("{}_description", job_key), description.clone());
        }
    }

    fields
}

/// `/project-highlights` 的表单字段，`job_skills` 总是发送（可能为空串）
pub fn highlights_fields(
    target_job: &str,
    job_skills: &[String],
    job_description: Option<&str>,
) -> FormFields {
    let mut fields = FormFields::new();
    fields.push("target_job", target_job.to_lowercase());
    fields.push("job_skills", job_skills.join(","));
    push_description(&mut fields, "job_description", job_description);
    fields
}

fn push_description(fields: &mut FormFields, name: &str, description: Option<&str>) {
    if let Some(desc) = description.map(str::trim).filter(|d| !d.is_empty()) {
        fields.push(name, desc);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn analyze_fields_lowercases_job_and_joins_skills() {
        let fields = analyze_fields(
            Some("Software Engineer"),
            &skills(&["Python", "Go"]),
            Some("  Build APIs  "),
        );

        assert_eq!(fields.get("target_job"), Some("software engineer"));
        assert_eq!(fields.get("job_skills"), Some("Python,Go"));
        assert_eq!(fields.get("job_description"), Some("Build APIs"));
    }

    #[test]
    fn analyze_fields_omits_empty_inputs() {
        let fields = analyze_fields(None, &[], Some("   "));
        assert!(fields.is_empty());

        let fields = analyze_fields(Some(""), &[], None);
        assert!(fields.get("target_job").is_none());
    }

    #[test]
    fn multiple_jobs_fields_use_lowercased_prefixes() {
        let mut jobs = IndexMap::new();
        jobs.insert("Data Scientist".to_string(), skills(&["Python", "SQL"]));
        jobs.insert("DevOps".to_string(), Vec::new());

        let mut descriptions = IndexMap::new();
        descriptions.insert("DevOps".to_string(), "Run clusters".to_string());

        let fields = multiple_jobs_fields(&jobs, Some(&descriptions));

        assert_eq!(fields.get("target_jobs"), Some("data scientist,devops"));
        assert_eq!(fields.get("data scientist_skills"), Some("Python,SQL"));
        assert_eq!(fields.get("devops_skills"), Some(""));
        assert_eq!(fields.get("devops_description"), Some("Run clusters"));
        assert!(fields.get("data scientist_description").is_none());
        assert_eq!(
            fields.names(),
            vec![
                "target_jobs",
                "data scientist_skills",
                "devops_skills",
                "devops_description"
            ]
        );
    }

    #[test]
    fn highlights_fields_always_send_skills() {
        let fields = highlights_fields("Backend Engineer", &[], None);
        assert_eq!(fields.get("target_job"), Some("backend engineer"));
        assert_eq!(fields.get("job_skills"), Some(""));
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn into_form_accepts_known_mime() {
        let doc = Document::from_bytes("cv.pdf", b"%PDF".to_vec());
        assert!(analyze_fields(Some("qa"), &[], None).into_form(&doc).is_ok());
    }
}

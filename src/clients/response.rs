//! 统一的响应处理策略
//!
//! 所有接口共用同一套分类规则：
//! 1. 非成功状态码 → `ApiError::Transport`，尽力提取错误信息
//! 2. 成功但响应体不是合法 JSON → `ApiError::InvalidResponse`
//! 3. 其余 → 解码后的 JSON

use reqwest::Response;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::utils::logging::truncate_text;

/// 处理后端响应
///
/// # 参数
/// - `response`: HTTP 响应
/// - `endpoint`: 接口路径（用于日志和错误信息）
///
/// # 返回
/// 返回解码后的 JSON
pub async fn handle_api_response(response: Response, endpoint: &str) -> Result<Value, ApiError> {
    let status = response.status();
    debug!("API 响应 {}: 状态码 {} ({})", endpoint, status, response.url());

    if !status.is_success() {
        let detail = match response.bytes().await {
            Ok(body) => extract_error_detail(&body),
            Err(e) => {
                warn!("读取错误响应体失败 ({}): {}", endpoint, e);
                None
            }
        };

        warn!(
            "⚠️ API 返回错误 ({}): {} {}",
            endpoint,
            status.as_u16(),
            detail
                .as_deref()
                .map(|d| truncate_text(d, 200))
                .unwrap_or_default()
        );

        return Err(ApiError::Transport {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            detail,
        });
    }

    let body = response.bytes().await.map_err(|source| ApiError::Network {
        endpoint: endpoint.to_string(),
        source,
    })?;

    decode_payload(&body, endpoint)
}

/// 从错误响应体中提取错误信息
///
/// 优先取 JSON 的 `error` 字段；响应体不是 JSON 时退回原始文本；都没有则为 None
pub fn extract_error_detail(body: &[u8]) -> Option<String> {
    match serde_json::from_slice::<Value>(body) {
        Ok(json) => match json.get("error") {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(Value::Null) | Some(Value::String(_)) | None => None,
            Some(other) => Some(other.to_string()),
        },
        Err(_) => {
            let text = String::from_utf8_lossy(body).trim().to_string();
            if text.is_empty() {
                None
            } else {
                Some(text)
            }
        }
    }
}

/// 解码成功响应体
pub fn decode_payload(body: &[u8], endpoint: &str) -> Result<Value, ApiError> {
    serde_json::from_slice(body).map_err(|source| {
        warn!(
            "⚠️ 服务端返回了无效的 JSON ({}): {}",
            endpoint,
            truncate_text(&String::from_utf8_lossy(body), 200)
        );
        ApiError::InvalidResponse {
            endpoint: endpoint.to_string(),
            source,
        }
    })
}

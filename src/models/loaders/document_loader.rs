use crate::error::{AppError, AppResult, FileError};
use crate::models::document::Document;
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// 从磁盘加载简历文件
///
/// # 参数
/// - `path`: 文件路径
///
/// # 返回
/// 返回可直接上传的 Document，文件名取路径的最后一段
pub async fn load_document(path: &Path) -> AppResult<Document> {
    if !fs::try_exists(path).await.unwrap_or(false) {
        return Err(AppError::File(FileError::NotFound {
            path: path.display().to_string(),
        }));
    }

    let bytes = fs::read(path)
        .await
        .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;

    let file_name = path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "resume".to_string());

    debug!("已加载文件 {} ({} 字节)", file_name, bytes.len());

    Ok(Document::from_bytes(file_name, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let path = std::env::temp_dir().join("resume-analyzer-client-does-not-exist.pdf");
        let err = load_document(&path).await.unwrap_err();
        assert!(matches!(err, AppError::File(FileError::NotFound { .. })));
    }

    #[tokio::test]
    async fn loads_bytes_and_file_name() {
        let path = std::env::temp_dir().join(format!(
            "resume-analyzer-client-{}.pdf",
            std::process::id()
        ));
        fs::write(&path, b"%PDF-1.4").await.unwrap();

        let doc = load_document(&path).await.unwrap();
        let _ = fs::remove_file(&path).await;

        assert_eq!(doc.bytes, b"%PDF-1.4");
        assert_eq!(doc.mime_type, "application/pdf");
        assert!(doc.file_name.ends_with(".pdf"));
    }
}

use std::path::Path;

/// 待上传的简历文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl Document {
    /// 由内存中的字节创建，MIME 类型按扩展名推断
    pub fn from_bytes(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        let file_name = file_name.into();
        let mime_type = mime_for(&file_name).to_string();
        Self {
            file_name,
            mime_type,
            bytes: bytes.into(),
        }
    }

    /// 显式指定 MIME 类型
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = mime_type.into();
        self
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

fn mime_for(file_name: &str) -> &'static str {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|s| s.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("pdf") => "application/pdf",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        Some("doc") => "application/msword",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infers_mime_from_extension() {
        assert_eq!(Document::from_bytes("cv.PDF", vec![1]).mime_type, "application/pdf");
        assert!(Document::from_bytes("cv.docx", vec![1])
            .mime_type
            .contains("wordprocessingml"));
        assert_eq!(
            Document::from_bytes("resume", vec![1]).mime_type,
            "application/octet-stream"
        );
    }

    #[test]
    fn explicit_mime_wins() {
        let doc = Document::from_bytes("cv.bin", b"abc".to_vec()).with_mime_type("application/pdf");
        assert_eq!(doc.mime_type, "application/pdf");
        assert_eq!(doc.len(), 3);
    }
}

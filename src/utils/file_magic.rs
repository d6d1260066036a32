//! 上传文件的类型识别
//!
//! 扩展名必须在白名单内，且文件头需与扩展名一致。

const OLE_HEADER: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];
const ZIP_HEADER: &[u8] = &[0x50, 0x4B, 0x03, 0x04];

/// 扩展名（含点号，小写）对应的 MIME 类型
pub fn mime_for_extension(extension: &str) -> &'static str {
    match extension.to_lowercase().as_str() {
        ".pdf" => "application/pdf",
        ".doc" => "application/msword",
        ".docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        ".ppt" => "application/vnd.ms-powerpoint",
        ".pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        ".xls" => "application/vnd.ms-excel",
        ".xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        ".zip" => "application/zip",
        ".png" => "image/png",
        ".jpg" | ".jpeg" => "image/jpeg",
        ".gif" => "image/gif",
        ".txt" => "text/plain; charset=utf-8",
        ".md" => "text/markdown; charset=utf-8",
        ".csv" => "text/csv; charset=utf-8",
        _ => "application/octet-stream",
    }
}

/// 从原始文件名取出小写扩展名（含点号）
pub fn extension_of(file_name: &str) -> String {
    std::path::Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default()
}

/// 验证文件开头的魔术字节是否与扩展名匹配
///
/// 纯文本类文件不检查内容；未知扩展名一律拒绝。
pub fn validate_magic_bytes(data: &[u8], extension: &str) -> bool {
    if data.is_empty() {
        return false;
    }

    match extension.to_lowercase().as_str() {
        ".pdf" => data.starts_with(b"%PDF"),
        ".doc" | ".xls" | ".ppt" => data.starts_with(OLE_HEADER),
        // OOXML 本质是 zip
        ".docx" | ".xlsx" | ".pptx" | ".zip" => data.starts_with(ZIP_HEADER),
        ".png" => data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]),
        ".jpg" | ".jpeg" => data.starts_with(&[0xFF, 0xD8, 0xFF]),
        ".gif" => data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a"),
        ".txt" | ".md" | ".csv" => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_office_formats() {
        assert!(validate_magic_bytes(OLE_HEADER, ".doc"));
        assert!(validate_magic_bytes(ZIP_HEADER, ".PPTX"));
        assert!(!validate_magic_bytes(ZIP_HEADER, ".doc"));
    }

    #[test]
    fn test_pdf_and_text() {
        assert!(validate_magic_bytes(b"%PDF-1.7", ".pdf"));
        assert!(!validate_magic_bytes(b"hello", ".pdf"));
        assert!(validate_magic_bytes(b"hello", ".txt"));
        assert!(!validate_magic_bytes(&[], ".txt"));
    }

    #[test]
    fn test_unknown_extension_rejected() {
        assert!(!validate_magic_bytes(b"MZ\x90\x00", ".exe"));
    }

    #[test]
    fn test_extension_and_mime() {
        assert_eq!(extension_of("Lecture 1.PDF"), ".pdf");
        assert_eq!(extension_of("README"), "");
        assert_eq!(mime_for_extension(".pdf"), "application/pdf");
        assert_eq!(mime_for_extension(".bin"), "application/octet-stream");
    }
}

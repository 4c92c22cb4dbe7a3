//! 上传文件名清洗与扩展名检查

/// 清洗用户提供的文件名
///
/// - 去掉 `/` 与 `\` 之前的目录部分
/// - 空白替换为 `_`，只保留 `[A-Za-z0-9._-]`
/// - 去掉开头的 `.`，拒绝 `.`、`..` 与空结果
pub fn sanitize_filename(name: &str) -> Option<String> {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default().trim();

    if base == "." || base == ".." {
        return None;
    }

    let cleaned: String = base
        .chars()
        .filter_map(|c| {
            if c.is_whitespace() {
                Some('_')
            } else if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                Some(c)
            } else {
                None
            }
        })
        .collect();

    let cleaned = cleaned.trim_start_matches('.');

    if cleaned.is_empty() || cleaned.contains("..") {
        return None;
    }

    Some(cleaned.to_string())
}

/// 取小写扩展名；没有 `.` 或扩展名为空时返回 None
pub fn extension_of(name: &str) -> Option<String> {
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// 存储名：`<unix 时间戳>_<清洗后的文件名>`
pub fn stored_name_for(sanitized: &str, unix_ts: i64) -> String {
    format!("{}_{}", unix_ts, sanitized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_directories() {
        assert_eq!(
            sanitize_filename("/etc/passwd.txt").as_deref(),
            Some("passwd.txt")
        );
        assert_eq!(
            sanitize_filename("..\\..\\windows\\win.ini").as_deref(),
            Some("win.ini")
        );
        assert_eq!(
            sanitize_filename("../../secret.pdf").as_deref(),
            Some("secret.pdf")
        );
    }

    #[test]
    fn test_rejects_dot_names() {
        assert_eq!(sanitize_filename(".."), None);
        assert_eq!(sanitize_filename("."), None);
        assert_eq!(sanitize_filename("a/.."), None);
        assert_eq!(sanitize_filename(""), None);
        assert_eq!(sanitize_filename("////"), None);
        assert_eq!(sanitize_filename("a..b.txt"), None);
    }

    #[test]
    fn test_unsafe_characters() {
        assert_eq!(
            sanitize_filename("my report (final).pdf").as_deref(),
            Some("my_report_final.pdf")
        );
        assert_eq!(
            sanitize_filename("héllo<>|.txt").as_deref(),
            Some("hllo.txt")
        );
        assert_eq!(sanitize_filename(".hidden.png").as_deref(), Some("hidden.png"));
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("photo.JPG").as_deref(), Some("jpg"));
        assert_eq!(extension_of("archive.tar.zip").as_deref(), Some("zip"));
        assert_eq!(extension_of("README"), None);
        assert_eq!(extension_of("trailing."), None);
        assert_eq!(extension_of(".png"), None);
    }

    #[test]
    fn test_stored_name() {
        assert_eq!(stored_name_for("a.txt", 1700000000), "1700000000_a.txt");
    }
}

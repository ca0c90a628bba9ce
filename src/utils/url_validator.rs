//! URL 验证模块
//!
//! 只接受带非空主机名的 http:// 与 https:// 链接，并返回规范化后的形式

use url::Url;

/// URL 验证错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlValidationError {
    InvalidScheme,
    MissingHost,
    InvalidFormat(String),
}

impl std::fmt::Display for UrlValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidScheme => write!(f, "URL must start with http:// or https://"),
            Self::MissingHost => write!(f, "URL must have host"),
            Self::InvalidFormat(_) => write!(f, "Invalid URL"),
        }
    }
}

impl std::error::Error for UrlValidationError {}

fn has_web_scheme(url: &str) -> bool {
    match url.split_once(':') {
        Some((scheme, _)) => {
            scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https")
        }
        None => false,
    }
}

/// 验证并规范化 URL
///
/// 检查项目：
/// 1. 协议必须是 http 或 https（不区分大小写）
/// 2. 主机名不能为空
/// 3. URL 格式有效
///
/// 返回解析后的规范形式（协议小写，空路径补 `/`）。
pub fn validate_url(url: &str) -> Result<String, UrlValidationError> {
    let url = url.trim();

    if !has_web_scheme(url) {
        return Err(UrlValidationError::InvalidScheme);
    }

    let parsed = Url::parse(url).map_err(|e| match e {
        url::ParseError::EmptyHost => UrlValidationError::MissingHost,
        other => UrlValidationError::InvalidFormat(other.to_string()),
    })?;

    match parsed.host_str() {
        Some(host) if !host.trim().is_empty() => Ok(parsed.to_string()),
        _ => Err(UrlValidationError::MissingHost),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_urls() {
        assert_eq!(
            validate_url("https://example.com/path?query=1").as_deref(),
            Ok("https://example.com/path?query=1")
        );
        assert!(validate_url("http://localhost:8080").is_ok());
        assert!(validate_url("  https://ya.ru  ").is_ok());
    }

    #[test]
    fn test_normalization() {
        assert_eq!(
            validate_url("HTTPS://Example.COM").as_deref(),
            Ok("https://example.com/")
        );
    }

    #[test]
    fn test_rejects_other_schemes() {
        assert_eq!(
            validate_url("ftp://ya.ru"),
            Err(UrlValidationError::InvalidScheme)
        );
        assert_eq!(
            validate_url("javascript:alert(1)"),
            Err(UrlValidationError::InvalidScheme)
        );
        assert_eq!(validate_url("not-a-url"), Err(UrlValidationError::InvalidScheme));
        assert_eq!(validate_url(""), Err(UrlValidationError::InvalidScheme));
    }

    #[test]
    fn test_rejects_missing_host() {
        assert_eq!(validate_url("http://"), Err(UrlValidationError::MissingHost));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            UrlValidationError::InvalidScheme.to_string(),
            "URL must start with http:// or https://"
        );
        assert_eq!(UrlValidationError::MissingHost.to_string(), "URL must have host");
    }
}

pub mod base62;
pub mod url_validator;

pub use url_validator::{UrlValidationError, validate_url};

/// 判断字符串是否为合法的 base-62 短码
pub fn is_base62_code(code: &str, length: usize) -> bool {
    code.len() == length && code.bytes().all(|b| b.is_ascii_alphanumeric())
}

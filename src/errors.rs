use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClicklinkError {
    InvalidInput(String),
    NotFound(String),
    Forbidden(String),
    CollisionExhausted(String),
    Configuration(String),
    FileOperation(String),
    Serialization(String),
}

impl ClicklinkError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            ClicklinkError::InvalidInput(_) => "E001",
            ClicklinkError::NotFound(_) => "E002",
            ClicklinkError::Forbidden(_) => "E003",
            ClicklinkError::CollisionExhausted(_) => "E004",
            ClicklinkError::Configuration(_) => "E005",
            ClicklinkError::FileOperation(_) => "E006",
            ClicklinkError::Serialization(_) => "E007",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            ClicklinkError::InvalidInput(_) => "Invalid Input",
            ClicklinkError::NotFound(_) => "Link Not Found",
            ClicklinkError::Forbidden(_) => "Forbidden",
            ClicklinkError::CollisionExhausted(_) => "Code Collision Exhausted",
            ClicklinkError::Configuration(_) => "Configuration Error",
            ClicklinkError::FileOperation(_) => "File Operation Error",
            ClicklinkError::Serialization(_) => "Serialization Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            ClicklinkError::InvalidInput(msg) => msg,
            ClicklinkError::NotFound(msg) => msg,
            ClicklinkError::Forbidden(msg) => msg,
            ClicklinkError::CollisionExhausted(msg) => msg,
            ClicklinkError::Configuration(msg) => msg,
            ClicklinkError::FileOperation(msg) => msg,
            ClicklinkError::Serialization(msg) => msg,
        }
    }

    /// Whether the failure should abort startup rather than reject a single request
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ClicklinkError::CollisionExhausted(_) | ClicklinkError::Configuration(_)
        )
    }

    /// 格式化为彩色输出
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出（用于交互式控制台）
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for ClicklinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ClicklinkError {}

// 便捷的构造函数
impl ClicklinkError {
    pub fn invalid_input<T: Into<String>>(msg: T) -> Self {
        ClicklinkError::InvalidInput(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        ClicklinkError::NotFound(msg.into())
    }

    pub fn forbidden<T: Into<String>>(msg: T) -> Self {
        ClicklinkError::Forbidden(msg.into())
    }

    pub fn collision_exhausted<T: Into<String>>(msg: T) -> Self {
        ClicklinkError::CollisionExhausted(msg.into())
    }

    pub fn configuration<T: Into<String>>(msg: T) -> Self {
        ClicklinkError::Configuration(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        ClicklinkError::FileOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        ClicklinkError::Serialization(msg.into())
    }
}

impl From<std::io::Error> for ClicklinkError {
    fn from(err: std::io::Error) -> Self {
        ClicklinkError::FileOperation(err.to_string())
    }
}

impl From<config::ConfigError> for ClicklinkError {
    fn from(err: config::ConfigError) -> Self {
        ClicklinkError::Configuration(err.to_string())
    }
}

impl From<toml::ser::Error> for ClicklinkError {
    fn from(err: toml::ser::Error) -> Self {
        ClicklinkError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ClicklinkError>;

use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 浏览器相关错误
    #[error("浏览器错误: {0}")]
    Browser(#[from] BrowserError),
    /// 题库 / 配置文件数据错误
    #[error("数据错误: {0}")]
    Data(#[from] DataError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 浏览器相关错误
#[derive(Debug, Error)]
pub enum BrowserError {
    /// 连接浏览器失败
    #[error("无法连接到浏览器 (端口: {port}): {source}")]
    ConnectionFailed {
        port: u16,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 执行脚本失败
    #[error("执行脚本失败: {source}")]
    ScriptExecutionFailed {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 脚本返回值无法解析
    #[error("脚本返回值解析失败: {source}")]
    BadScriptResult {
        #[source]
        source: serde_json::Error,
    },
}

/// 数据源错误
///
/// 与"没有匹配"严格区分：没有匹配返回 `None`，只有数据源本身不可用才是错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    /// 题库或档案文件不可用（不存在、无法读取、无法解析）
    #[error("数据源不可用 ({path}): {reason}")]
    Unavailable { path: String, reason: String },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 配置值非法
    #[error("配置项 {name} 的值 '{value}' 非法: {reason}")]
    InvalidValue {
        name: String,
        value: String,
        reason: String,
    },
}

// ========== 从常见错误类型转换 ==========

impl From<chromiumoxide::error::CdpError> for AppError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        AppError::Browser(BrowserError::ScriptExecutionFailed {
            source: Box::new(err),
        })
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Browser(BrowserError::BadScriptResult { source: err })
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建浏览器连接错误
    pub fn browser_connection_failed(
        port: u16,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Browser(BrowserError::ConnectionFailed {
            port,
            source: Box::new(source),
        })
    }

    /// 创建数据源不可用错误
    pub fn data_unavailable(path: impl Into<String>, reason: impl ToString) -> Self {
        AppError::Data(DataError::unavailable(path, reason))
    }
}

impl DataError {
    /// 创建数据源不可用错误
    pub fn unavailable(path: impl Into<String>, reason: impl ToString) -> Self {
        DataError::Unavailable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// JSON 解析错误
    #[error("解析错误: {0}")]
    Parse(#[from] ParseError),
    /// 远端 LLM 调用错误
    #[error("远端错误: {0}")]
    Remote(#[from] RemoteError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 创建文件失败
    #[error("创建文件失败 ({path}): {source}")]
    CreateFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// JSON 解析错误
///
/// `what` 标明出错的位置：输入文件、模板文件、响应包、函数调用参数
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("无法解析{what}: {source}")]
    Json {
        what: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("无法序列化{what}: {source}")]
    Encode {
        what: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("无法解析 TOML 配置 ({path}): {source}")]
    Toml {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// 远端调用错误
#[derive(Debug, Error)]
pub enum RemoteError {
    /// 服务商在响应包里返回了 error 对象
    #[error("api error: {message}")]
    Provider {
        message: String,
        kind: Option<String>,
        code: Option<String>,
    },
    /// 响应中没有任何 choice
    #[error("empty choices: invalid response")]
    EmptyChoices,
    /// 网络层失败
    #[error("http error: {0}")]
    Transport(#[from] reqwest::Error),
    /// 非 2xx 且响应体无法识别
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 缺少鉴权 token
    #[error("鉴权 token 不能为空 (-t <token>)")]
    MissingToken,
    /// 范围不合法
    #[error("处理范围不合法: start={start}, end={end}")]
    InvalidRange { start: usize, end: usize },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建 JSON 解析错误
    pub fn json_parse_failed(what: impl Into<String>, source: serde_json::Error) -> Self {
        AppError::Parse(ParseError::Json {
            what: what.into(),
            source,
        })
    }

    /// 是否为服务商返回的错误（区别于网络层错误）
    pub fn is_provider_error(&self) -> bool {
        matches!(self, AppError::Remote(RemoteError::Provider { .. }))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Remote(RemoteError::Transport(err))
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

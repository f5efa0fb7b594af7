use crate::error::{AppError, AppResult, ConfigError, ParseError};
use crate::orchestrator::Selection;
use serde::Deserialize;
use std::path::Path;

/// 默认的 chat-completion 接口
pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
/// 模板中没有 model 字段时使用的模型
pub const DEFAULT_MODEL: &str = "gpt-4-0613";

/// 程序配置
///
/// 优先级：默认值 < TOML 文件 < 环境变量 < 命令行
#[derive(Clone, Debug)]
pub struct Config {
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_url: String,
    pub llm_model_name: String,
    // --- 文件 ---
    /// 题目输入文件
    pub input_file: String,
    /// 结果输出文件（跨次运行累积）
    pub output_file: String,
    /// 请求模板文件
    pub template_file: String,
    /// 失败记录文件
    pub failed_log_file: String,
    // --- 处理范围（针对过滤后的题目序列） ---
    pub range_start: usize,
    pub range_end: Option<usize>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm_api_key: String::new(),
            llm_api_url: DEFAULT_API_URL.to_string(),
            llm_model_name: DEFAULT_MODEL.to_string(),
            input_file: "input.json".to_string(),
            output_file: "output.json".to_string(),
            template_file: "function.json".to_string(),
            failed_log_file: "failed.txt".to_string(),
            range_start: 0,
            range_end: None,
            verbose_logging: false,
        }
    }
}

/// TOML 配置文件，所有字段可选
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    llm_api_url: Option<String>,
    llm_model_name: Option<String>,
    input_file: Option<String>,
    output_file: Option<String>,
    template_file: Option<String>,
    failed_log_file: Option<String>,
    range_start: Option<usize>,
    range_end: Option<usize>,
    verbose_logging: Option<bool>,
}

impl Config {
    /// 默认值叠加环境变量
    pub fn from_env() -> AppResult<Self> {
        Self::default().overlay_env_with(|key| std::env::var(key).ok())
    }

    /// 用 TOML 文件覆盖当前配置
    pub fn overlay_toml_file(self, path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;
        self.overlay_toml_str(&content, &path.display().to_string())
    }

    fn overlay_toml_str(mut self, content: &str, origin: &str) -> AppResult<Self> {
        let file: ConfigFile = toml::from_str(content).map_err(|source| ParseError::Toml {
            path: origin.to_string(),
            source,
        })?;

        if let Some(v) = file.llm_api_url {
            self.llm_api_url = v;
        }
        if let Some(v) = file.llm_model_name {
            self.llm_model_name = v;
        }
        if let Some(v) = file.input_file {
            self.input_file = v;
        }
        if let Some(v) = file.output_file {
            self.output_file = v;
        }
        if let Some(v) = file.template_file {
            self.template_file = v;
        }
        if let Some(v) = file.failed_log_file {
            self.failed_log_file = v;
        }
        if let Some(v) = file.range_start {
            self.range_start = v;
        }
        if file.range_end.is_some() {
            self.range_end = file.range_end;
        }
        if let Some(v) = file.verbose_logging {
            self.verbose_logging = v;
        }
        Ok(self)
    }

    /// 用环境变量覆盖当前配置，`lookup` 便于测试时注入
    pub fn overlay_env_with<F>(mut self, lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("LLM_API_URL") {
            self.llm_api_url = v;
        }
        if let Some(v) = lookup("LLM_MODEL_NAME") {
            self.llm_model_name = v;
        }
        if let Some(v) = lookup("INPUT_FILE") {
            self.input_file = v;
        }
        if let Some(v) = lookup("OUTPUT_FILE") {
            self.output_file = v;
        }
        if let Some(v) = lookup("TEMPLATE_FILE") {
            self.template_file = v;
        }
        if let Some(v) = lookup("FAILED_LOG_FILE") {
            self.failed_log_file = v;
        }
        if let Some(v) = lookup("RANGE_START") {
            self.range_start = parse_env("RANGE_START", &v, "usize")?;
        }
        if let Some(v) = lookup("RANGE_END") {
            self.range_end = Some(parse_env("RANGE_END", &v, "usize")?);
        }
        if let Some(v) = lookup("VERBOSE_LOGGING") {
            self.verbose_logging = parse_env("VERBOSE_LOGGING", &v, "bool")?;
        }
        Ok(self)
    }

    /// 当前配置对应的处理范围
    pub fn selection(&self) -> AppResult<Selection> {
        if let Some(end) = self.range_end {
            if end < self.range_start {
                return Err(ConfigError::InvalidRange {
                    start: self.range_start,
                    end,
                }
                .into());
            }
        }
        Ok(Selection::new(self.range_start, self.range_end))
    }
}

fn parse_env<T: std::str::FromStr>(var_name: &str, value: &str, expected_type: &str) -> AppResult<T> {
    value.trim().parse().map_err(|_| {
        ConfigError::EnvVarParseFailed {
            var_name: var_name.to_string(),
            value: value.to_string(),
            expected_type: expected_type.to_string(),
        }
        .into()
    })
}

//! 命令行参数
//!
//! 命令行的值覆盖配置文件和环境变量

use crate::config::Config;
use crate::error::{AppResult, ConfigError};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "question_regen", about = "批量重新生成开放题", version)]
pub struct Cli {
    /// OpenAI 鉴权 token
    #[arg(short = 't', long = "token")]
    pub token: String,

    /// TOML 配置文件
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// 题目输入文件
    #[arg(long)]
    pub input: Option<String>,

    /// 结果输出文件
    #[arg(long)]
    pub output: Option<String>,

    /// 请求模板文件
    #[arg(long)]
    pub template: Option<String>,

    /// 处理范围起点（过滤后的序号，含）
    #[arg(long)]
    pub start: Option<usize>,

    /// 处理范围终点（不含）
    #[arg(long)]
    pub end: Option<usize>,

    /// chat-completion 接口地址
    #[arg(long)]
    pub endpoint: Option<String>,

    /// 模板未指定时使用的模型
    #[arg(long)]
    pub model: Option<String>,

    /// 输出 debug 日志
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// 默认值 < 配置文件 < 环境变量 < 命令行
    pub fn into_config(self) -> AppResult<Config> {
        let base = match &self.config {
            Some(path) => Config::default().overlay_toml_file(path)?,
            None => Config::default(),
        };
        let config = base.overlay_env_with(|key| std::env::var(key).ok())?;
        self.apply(config)
    }

    fn apply(self, mut config: Config) -> AppResult<Config> {
        if self.token.trim().is_empty() {
            return Err(ConfigError::MissingToken.into());
        }
        config.llm_api_key = self.token;

        if let Some(v) = self.input {
            config.input_file = v;
        }
        if let Some(v) = self.output {
            config.output_file = v;
        }
        if let Some(v) = self.template {
            config.template_file = v;
        }
        if let Some(v) = self.start {
            config.range_start = v;
        }
        if self.end.is_some() {
            config.range_end = self.end;
        }
        if let Some(v) = self.endpoint {
            config.llm_api_url = v;
        }
        if let Some(v) = self.model {
            config.llm_model_name = v;
        }
        if self.verbose {
            config.verbose_logging = true;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn token_flag_is_required() {
        assert!(Cli::try_parse_from(["question_regen"]).is_err());
    }

    #[test]
    fn empty_token_is_rejected() {
        let cli = Cli::try_parse_from(["question_regen", "-t", " "]).unwrap();
        let err = cli.apply(Config::default()).unwrap_err();
        assert!(matches!(err, AppError::Config(ConfigError::MissingToken)));
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::try_parse_from([
            "question_regen",
            "-t",
            "sk-abc",
            "--start",
            "1",
            "--end",
            "2",
            "--output",
            "out.json",
            "-v",
        ])
        .unwrap();

        let config = cli.apply(Config::default()).unwrap();
        assert_eq!(config.llm_api_key, "sk-abc");
        assert_eq!(config.range_start, 1);
        assert_eq!(config.range_end, Some(2));
        assert_eq!(config.output_file, "out.json");
        assert_eq!(config.input_file, "input.json");
        assert!(config.verbose_logging);
    }
}

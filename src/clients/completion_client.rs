/// chat-completion 客户端
///
/// 每道题一次 POST，解析函数调用返回的结构化题目
use crate::config::Config;
use crate::error::{AppError, AppResult, RemoteError};
use crate::models::{ChatRequest, ChatResponse, GeneratedQuestion};
use crate::utils::logging::truncate_text;
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use tracing::{debug, warn};

/// 远端生成能力
///
/// 编排层只依赖这个 trait，测试时可以换成假的实现
#[async_trait]
pub trait Completer: Send + Sync {
    async fn complete(&self, request: &ChatRequest) -> AppResult<GeneratedQuestion>;
}

/// 基于 reqwest 的 chat-completion 客户端
///
/// 不设置超时，也不重试
pub struct CompletionClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl CompletionClient {
    /// 创建新的客户端
    pub fn new(config: &Config) -> Self {
        Self::with_http_client(reqwest::Client::new(), config)
    }

    /// 使用自定义的 reqwest 客户端
    pub fn with_http_client(http: reqwest::Client, config: &Config) -> Self {
        Self {
            http,
            api_url: config.llm_api_url.clone(),
            api_key: config.llm_api_key.clone(),
        }
    }

    /// 解析响应包
    ///
    /// 顺序：error 对象 → 第一个 choice 的函数调用参数 → 空 choices
    pub fn parse_response(status: u16, body: &str) -> AppResult<GeneratedQuestion> {
        let envelope: ChatResponse = match serde_json::from_str(body) {
            Ok(envelope) => envelope,
            Err(e) if !(200..300).contains(&status) => {
                debug!("无法识别的错误响应: {}", e);
                return Err(RemoteError::Status {
                    status,
                    body: truncate_text(body, 200),
                }
                .into());
            }
            Err(e) => return Err(AppError::json_parse_failed("响应包", e)),
        };

        if let Some(error) = envelope.error {
            let code = error.code_string();
            return Err(RemoteError::Provider {
                message: error.message,
                kind: error.kind,
                code,
            }
            .into());
        }

        let choice = envelope
            .choices
            .into_iter()
            .next()
            .ok_or(RemoteError::EmptyChoices)?;

        let arguments = choice
            .message
            .function_call
            .map(|call| call.arguments)
            .unwrap_or_default();

        serde_json::from_str(&arguments).map_err(|e| AppError::json_parse_failed("函数调用参数", e))
    }
}

#[async_trait]
impl Completer for CompletionClient {
    async fn complete(&self, request: &ChatRequest) -> AppResult<GeneratedQuestion> {
        debug!("调用 LLM API，模型: {}", request.model);

        let response = self
            .http
            .post(&self.api_url)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(request)
            .send()
            .await
            .map_err(|e| {
                warn!("LLM API 调用失败: {}", e);
                AppError::from(e)
            })?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!("LLM API 返回状态 {}，响应长度 {} 字节", status, body.len());

        Self::parse_response(status, &body)
    }
}

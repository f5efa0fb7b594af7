//! 题目处理流程 - 流程层
//!
//! 核心职责：定义"一道题"的完整处理流程
//!
//! 流程顺序：
//! 1. 构建请求
//! 2. 调用 LLM
//! 3. 用生成结果覆盖题干、答案、提示
//!
//! 失败直接返回错误，没有重试

use std::sync::Arc;
use tracing::{debug, info};

use crate::clients::Completer;
use crate::error::AppResult;
use crate::models::question::Question;
use crate::services::PromptBuilder;
use crate::utils::logging::truncate_text;
use crate::workflow::question_ctx::QuestionCtx;

/// 题目处理流程
///
/// - 不持有题目，每次调用拿走一道题的所有权
/// - 克隆开销只是两个 Arc，可以给每个 worker 一份
#[derive(Clone)]
pub struct QuestionFlow {
    builder: Arc<PromptBuilder>,
    completer: Arc<dyn Completer>,
}

impl QuestionFlow {
    pub fn new(builder: Arc<PromptBuilder>, completer: Arc<dyn Completer>) -> Self {
        Self { builder, completer }
    }

    pub async fn run(&self, mut question: Question, ctx: &QuestionCtx) -> AppResult<Question> {
        info!("{} 🔄 正在请求重新生成...", ctx);
        debug!("{} 原题干: {}", ctx, truncate_text(&question.question, 80));

        let request = self.builder.build(&question);
        let generated = self.completer.complete(&request).await?;

        question.apply_generated(generated);
        info!(
            "{} ✓ 生成成功: {}",
            ctx,
            truncate_text(&question.question, 60)
        );

        Ok(question)
    }
}

//! 批量题目处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责一批题目的并发处理和结果落盘。
//!
//! ## 核心功能
//!
//! 1. **准备**：确保输出文件存在，加载请求模板
//! 2. **加载**：读取输入题目，只保留开放题
//! 3. **并发**：选定范围内每道题一个 tokio 任务，结果写入同一个有界通道
//! 4. **汇合**：等待全部任务结束后关闭通道，顺序取出结果
//! 5. **落盘**：成功的题目交给 `OutputGuard`，无论流程是否正常结束都会保存
//!
//! ## 设计特点
//!
//! - **无全局状态**：累积结果由 `run_batch` 返回给调用方
//! - **失败隔离**：单题失败（包括 panic）只影响自己，不会中断其他任务
//! - **无重试**：失败的题目只记日志和 failed.txt

use crate::clients::{Completer, CompletionClient};
use crate::config::Config;
use crate::error::AppResult;
use crate::models::load_template;
use crate::models::question::Question;
use crate::orchestrator::output_guard::OutputGuard;
use crate::orchestrator::selection::Selection;
use crate::services::{FailureLog, PromptBuilder, RecordStore};
use crate::utils::logging;
use crate::workflow::{QuestionCtx, QuestionFlow};
use anyhow::{Context, Result};
use futures::future::join_all;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// 通道容量在任务数之外多留的余量，保证发送永不阻塞
const RESULT_CHANNEL_SLACK: usize = 16;

/// 单题结果
#[derive(Debug)]
pub struct ItemOutcome {
    pub ctx: QuestionCtx,
    pub result: AppResult<Question>,
}

/// 单题失败记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFailure {
    pub index: usize,
    pub title: String,
    pub reason: String,
}

impl ItemFailure {
    fn new(ctx: &QuestionCtx, reason: impl Into<String>) -> Self {
        Self {
            index: ctx.index,
            title: ctx.title.clone(),
            reason: reason.into(),
        }
    }
}

/// 一批题目的处理结果
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// 成功的题目，按完成顺序排列
    pub accumulated: Vec<Question>,
    pub failed: Vec<ItemFailure>,
    /// 实际派发的任务数
    pub dispatched: usize,
}

/// 并发处理选定范围内的题目
///
/// 每道题一个任务，没有额外的并发上限
pub async fn run_batch(
    questions: Vec<Question>,
    selection: &Selection,
    flow: QuestionFlow,
) -> BatchOutcome {
    let total = questions.len();
    let window = selection.window(total);
    if window.is_empty() && total > 0 {
        warn!("⚠️ 处理范围 {} 在 {} 道题中没有选中任何题目", selection, total);
    }
    logging::log_selection(total, &window);

    let selected: Vec<(usize, Question)> = questions
        .into_iter()
        .enumerate()
        .skip(window.start)
        .take(window.len())
        .collect();

    let (tx, mut rx) = mpsc::channel::<ItemOutcome>(selected.len() + RESULT_CHANNEL_SLACK);
    let mut handles = Vec::with_capacity(selected.len());

    for (index, question) in selected {
        let ctx = QuestionCtx::new(index, question.title.clone());
        let worker_ctx = ctx.clone();
        let tx = tx.clone();
        let flow = flow.clone();

        let handle = tokio::spawn(async move {
            info!("{} 📤 开始处理", worker_ctx);
            let result = flow.run(question, &worker_ctx).await;
            if tx
                .send(ItemOutcome {
                    ctx: worker_ctx,
                    result,
                })
                .await
                .is_err()
            {
                error!("结果通道已关闭");
            }
        });
        handles.push((ctx, handle));
    }
    drop(tx);

    let mut outcome = BatchOutcome {
        dispatched: handles.len(),
        ..Default::default()
    };

    // 等待全部任务结束
    let joined = join_all(
        handles
            .into_iter()
            .map(|(ctx, handle)| async move { (ctx, handle.await) }),
    )
    .await;

    for (ctx, joined) in joined {
        if let Err(e) = joined {
            error!("{} ❌ 任务执行失败: {}", ctx, e);
            outcome
                .failed
                .push(ItemFailure::new(&ctx, format!("任务执行失败: {}", e)));
        }
    }

    while let Some(item) = rx.recv().await {
        match item.result {
            Ok(question) => outcome.accumulated.push(question),
            Err(e) => {
                error!("{} ❌ 处理失败: {}", item.ctx, e);
                outcome.failed.push(ItemFailure::new(&item.ctx, e.to_string()));
            }
        }
    }

    outcome
}

/// 运行统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// 过滤后的开放题数量
    pub open_text: usize,
    pub dispatched: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// 保存后输出文件中的记录总数
    pub total_records: usize,
}

/// 应用主结构
pub struct App {
    config: Config,
    completer: Arc<dyn Completer>,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Self {
        let completer = Arc::new(CompletionClient::new(&config));
        Self::with_completer(config, completer)
    }

    /// 使用指定的远端实现
    pub fn with_completer(config: Config, completer: Arc<dyn Completer>) -> Self {
        logging::log_startup(&config);
        Self { config, completer }
    }

    /// 运行应用主逻辑
    ///
    /// 出错时也会先保存已经拿到的结果，再把错误返回
    pub async fn run(&self) -> Result<RunSummary> {
        let started = Instant::now();
        let store = RecordStore::new(&self.config.input_file, &self.config.output_file);

        store
            .ensure_output_exists()
            .context("无法准备输出文件")?;

        let mut guard = OutputGuard::new(&store);
        let processed = self.process(&store, &mut guard).await;
        let saved = guard.commit();

        info!("⏱️ 耗时: {:.2?}", started.elapsed());

        let mut summary = processed?;
        summary.total_records = saved.context("保存输出文件失败")?;

        logging::print_final_stats(&summary, &self.config.output_file);
        Ok(summary)
    }

    async fn process(&self, store: &RecordStore, guard: &mut OutputGuard<'_>) -> Result<RunSummary> {
        let template = load_template(Path::new(&self.config.template_file))
            .context("无法加载请求模板")?;
        let builder = Arc::new(PromptBuilder::new(
            template,
            self.config.llm_model_name.clone(),
        ));

        let questions = store.load_open_text().context("无法加载输入题目")?;
        info!("📋 开放题总数: {}", questions.len());

        let selection = self.config.selection()?;
        let open_text = questions.len();

        let flow = QuestionFlow::new(builder, self.completer.clone());
        let outcome = run_batch(questions, &selection, flow).await;

        self.record_failures(&outcome.failed);

        let summary = RunSummary {
            open_text,
            dispatched: outcome.dispatched,
            succeeded: outcome.accumulated.len(),
            failed: outcome.failed.len(),
            total_records: 0,
        };
        guard.extend(outcome.accumulated);

        Ok(summary)
    }

    fn record_failures(&self, failed: &[ItemFailure]) {
        if failed.is_empty() {
            return;
        }

        let log = FailureLog::with_path(&self.config.failed_log_file);
        for failure in failed {
            if let Err(e) = log.write(failure.index, &failure.title, &failure.reason) {
                warn!("写入失败记录失败: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, RemoteError};
    use crate::models::{ChatRequest, GeneratedQuestion, RequestTemplate};
    use async_trait::async_trait;
    use std::time::Duration;

    /// 按题干决定返回什么
    struct ByPrompt;

    #[async_trait]
    impl Completer for ByPrompt {
        async fn complete(&self, request: &ChatRequest) -> AppResult<GeneratedQuestion> {
            let prompt = &request.messages[0].content;
            if prompt.starts_with("fail") {
                return Err(RemoteError::Provider {
                    message: "rate limited".to_string(),
                    kind: None,
                    code: None,
                }
                .into());
            }
            if prompt.starts_with("panic") {
                panic!("worker blew up");
            }
            if prompt.starts_with("slow") {
                tokio::time::sleep(Duration::from_millis(50)).await;
            }
            let stem = prompt.split(' ').next().unwrap_or_default();
            Ok(GeneratedQuestion {
                question: format!("{stem}-regen"),
                correct_answer: format!("{stem}-answer"),
                hints: format!("{stem}-hints"),
            })
        }
    }

    fn flow() -> QuestionFlow {
        let builder = Arc::new(PromptBuilder::new(RequestTemplate::default(), "gpt-4-0613"));
        QuestionFlow::new(builder, Arc::new(ByPrompt))
    }

    fn questions(stems: &[&str]) -> Vec<Question> {
        stems
            .iter()
            .enumerate()
            .map(|(i, stem)| Question {
                title: format!("q{i}"),
                answer_type: "Open text".to_string(),
                question: stem.to_string(),
                ..Default::default()
            })
            .collect()
    }

    fn sorted_questions(outcome: &BatchOutcome) -> Vec<String> {
        let mut stems: Vec<_> = outcome
            .accumulated
            .iter()
            .map(|q| q.question.clone())
            .collect();
        stems.sort();
        stems
    }

    #[tokio::test]
    async fn only_selected_window_is_dispatched() {
        let outcome = run_batch(
            questions(&["a", "b", "c", "d"]),
            &Selection::new(1, Some(3)),
            flow(),
        )
        .await;

        assert_eq!(outcome.dispatched, 2);
        assert_eq!(sorted_questions(&outcome), vec!["b-regen", "c-regen"]);
        assert!(outcome.failed.is_empty());
    }

    #[tokio::test]
    async fn failures_do_not_abort_siblings() {
        let outcome = run_batch(
            questions(&["slow", "fail", "c"]),
            &Selection::all(),
            flow(),
        )
        .await;

        assert_eq!(sorted_questions(&outcome), vec!["c-regen", "slow-regen"]);
        assert_eq!(outcome.failed.len(), 1);
        assert_eq!(outcome.failed[0].index, 1);
        assert!(outcome.failed[0].reason.contains("rate limited"));
    }

    #[tokio::test]
    async fn worker_panic_is_contained() {
        let outcome = run_batch(questions(&["a", "panic", "b"]), &Selection::all(), flow()).await;

        assert_eq!(sorted_questions(&outcome), vec!["a-regen", "b-regen"]);
        assert_eq!(outcome.failed.len(), 1);
        assert_eq!(outcome.failed[0].title, "q1");
    }

    #[tokio::test]
    async fn empty_selection_dispatches_nothing() {
        let outcome = run_batch(questions(&["a"]), &Selection::new(5, None), flow()).await;
        assert_eq!(outcome.dispatched, 0);
        assert!(outcome.accumulated.is_empty());
    }

    #[tokio::test]
    async fn results_keep_untouched_fields() {
        let mut input = questions(&["a"]);
        input[0].mmr = "1337".to_string();
        input[0].values = "x=1".to_string();

        let outcome = run_batch(input, &Selection::all(), flow()).await;
        let q = &outcome.accumulated[0];
        assert_eq!(q.mmr, "1337");
        assert_eq!(q.values, "x=1");
        assert_eq!(q.answer, "a-answer");
        assert_eq!(q.hints, "a-hints");
    }

    #[tokio::test]
    async fn provider_error_is_distinct_in_outcome() {
        let outcome = run_batch(questions(&["fail"]), &Selection::all(), flow()).await;
        assert!(outcome.accumulated.is_empty());
        assert!(outcome.failed[0].reason.contains("api error"));

        let err: AppError = RemoteError::EmptyChoices.into();
        assert!(!err.is_provider_error());
    }
}

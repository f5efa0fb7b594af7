//! # Question Regen
//!
//! 读取题目文件，把开放题逐个交给 LLM 重新生成，结果追加写入输出文件
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 能力层（Services / Clients）
//! - `services/` - 描述"我能做什么"，只处理单个 Question 或单个文件
//! - `RecordStore` - 读取输入、累积写入输出
//! - `PromptBuilder` - 模板 + 题干 → 请求体
//! - `FailureLog` - 写 failed.txt 能力
//! - `clients/CompletionClient` - 一次 chat-completion 调用
//!
//! ### ② 流程层（Workflow）
//! - `workflow/` - 定义"一道题"的完整处理流程
//! - `QuestionCtx` - 上下文封装（索引 + 标题）
//! - `QuestionFlow` - 流程编排（build → complete → apply）
//!
//! ### ③ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 选定范围内的题目并发处理、汇合、落盘
//! - `orchestrator/output_guard` - 无论是否出错都会保存已有结果
//!
//! ## 模块结构

pub mod cli;
pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{Completer, CompletionClient};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{GeneratedQuestion, Question};
pub use orchestrator::{run_batch, App, RunSummary, Selection};
pub use workflow::{QuestionCtx, QuestionFlow};

//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责一批题目的并发调度和结果落盘，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量题目处理器
//! - 管理应用生命周期（准备文件、加载、运行、保存）
//! - 选定范围内每题一个任务，有界通道收集结果
//! - 汇总统计，写失败记录
//!
//! ### `selection` - 处理范围
//! ### `output_guard` - 保证退出前保存累积结果
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<Question>)
//!     ↓
//! workflow::QuestionFlow (处理单个 Question)
//!     ↓
//! services / clients (能力层：prompt / store / completion)
//! ```

pub mod batch_processor;
pub mod output_guard;
pub mod selection;

// 重新导出主要类型
pub use batch_processor::{run_batch, App, BatchOutcome, ItemFailure, ItemOutcome, RunSummary};
pub use output_guard::OutputGuard;
pub use selection::Selection;

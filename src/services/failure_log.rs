//! 失败记录服务 - 业务能力层
//!
//! 只负责"写 failed.txt"能力，不关心流程

use anyhow::Result;
use std::fs::OpenOptions;
use std::io::Write;
use tracing::debug;

/// 失败记录服务
///
/// 每道失败的题目追加一行，方便下次手动挑选范围重跑
pub struct FailureLog {
    path: String,
}

impl FailureLog {
    pub fn with_path(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// 写入一条失败记录
    ///
    /// # 参数
    /// - `index`: 题目在过滤后序列中的索引
    /// - `title`: 题目标题（可能为空）
    /// - `reason`: 失败原因
    pub fn write(&self, index: usize, title: &str, reason: &str) -> Result<()> {
        debug!("写入失败记录: 题目 #{} | {}", index, reason);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let line = format!(
            "{} | #{} | {} | {}\n",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            index,
            title,
            reason.replace('\n', " ")
        );

        file.write_all(line.as_bytes())?;

        Ok(())
    }
}

impl Default for FailureLog {
    fn default() -> Self {
        Self::with_path("failed.txt")
    }
}

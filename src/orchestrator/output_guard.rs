//! 输出守卫
//!
//! 持有本次运行的累积结果。显式 `commit` 时保存；如果流程提前返回或 panic，
//! 守卫在析构时保存已有结果。

use crate::error::AppResult;
use crate::models::question::Question;
use crate::services::RecordStore;
use tracing::{error, warn};

pub struct OutputGuard<'a> {
    store: &'a RecordStore,
    accumulated: Vec<Question>,
    committed: bool,
}

impl<'a> OutputGuard<'a> {
    pub fn new(store: &'a RecordStore) -> Self {
        Self {
            store,
            accumulated: Vec::new(),
            committed: false,
        }
    }

    pub fn extend(&mut self, questions: impl IntoIterator<Item = Question>) {
        self.accumulated.extend(questions);
    }

    pub fn len(&self) -> usize {
        self.accumulated.len()
    }

    /// 保存累积结果，返回输出文件中的记录总数
    pub fn commit(mut self) -> AppResult<usize> {
        self.committed = true;
        let accumulated = std::mem::take(&mut self.accumulated);
        self.store.save(&accumulated)
    }
}

impl Drop for OutputGuard<'_> {
    fn drop(&mut self) {
        if self.committed {
            return;
        }

        warn!(
            "⚠️ 流程未正常结束，正在保存已有的 {} 条结果...",
            self.len()
        );
        if let Err(e) = self.store.save(&self.accumulated) {
            error!("❌ 保存输出文件失败: {}", e);
        }
    }
}

//! 题目处理上下文
//!
//! 封装"我正在处理第几题"这一信息

use std::fmt::Display;

/// 题目处理上下文
#[derive(Debug, Clone)]
pub struct QuestionCtx {
    /// 题目在过滤后序列中的索引（从0开始）
    pub index: usize,

    /// 题目标题（仅用于日志显示）
    pub title: String,
}

impl QuestionCtx {
    pub fn new(index: usize, title: impl Into<String>) -> Self {
        Self {
            index,
            title: title.into(),
        }
    }
}

impl Display for QuestionCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.title.is_empty() {
            write!(f, "[题目 #{}]", self.index)
        } else {
            write!(f, "[题目 #{} {}]", self.index, self.title)
        }
    }
}

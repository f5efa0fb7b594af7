use std::fmt::Display;
use std::ops::Range;

/// 处理范围：过滤后题目序列上的半开区间 `[start, end)`
///
/// `end` 为空表示一直到末尾；越界的部分会被截掉
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub start: usize,
    pub end: Option<usize>,
}

impl Selection {
    pub fn new(start: usize, end: Option<usize>) -> Self {
        Self { start, end }
    }

    /// 全部题目
    pub fn all() -> Self {
        Self::default()
    }

    /// 在长度为 `len` 的序列上实际生效的区间
    pub fn window(&self, len: usize) -> Range<usize> {
        let end = self.end.unwrap_or(len).min(len);
        let start = self.start.min(end);
        start..end
    }
}

impl Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.end {
            Some(end) => write!(f, "[{}, {})", self.start, end),
            None => write!(f, "[{}, ..)", self.start),
        }
    }
}

//! 题目存储 - 业务能力层
//!
//! 负责输入文件的读取和输出文件的累积写入

use crate::error::{AppError, AppResult, FileError, ParseError};
use crate::models::loaders::{load_questions, read_json};
use crate::models::question::Question;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// 只保留开放题，其余题型直接丢弃，不会写回输出文件
pub fn filter_open_text(questions: Vec<Question>) -> Vec<Question> {
    questions.into_iter().filter(Question::is_open_text).collect()
}

/// 题目存储
///
/// 输出文件跨次运行累积：旧内容 + 本次结果，不去重
#[derive(Debug, Clone)]
pub struct RecordStore {
    input_path: PathBuf,
    output_path: PathBuf,
}

impl RecordStore {
    pub fn new(input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// 加载全部输入题目
    pub fn load(&self) -> AppResult<Vec<Question>> {
        load_questions(&self.input_path)
    }

    /// 加载并过滤出开放题
    pub fn load_open_text(&self) -> AppResult<Vec<Question>> {
        let all = self.load()?;
        let total = all.len();
        let filtered = filter_open_text(all);
        debug!("过滤开放题: {}/{}", filtered.len(), total);
        Ok(filtered)
    }

    /// 输出文件不存在时创建一个空文件
    pub fn ensure_output_exists(&self) -> AppResult<()> {
        if self.output_path.exists() {
            return Ok(());
        }

        info!("输出文件不存在，正在创建: {}", self.output_path.display());
        OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.output_path)
            .map_err(|source| FileError::CreateFailed {
                path: self.output_path.display().to_string(),
                source,
            })?;
        Ok(())
    }

    /// 读取已有的输出记录
    ///
    /// 空文件（刚由 `ensure_output_exists` 创建）就是没有旧记录
    pub fn load_previous(&self) -> AppResult<Vec<Question>> {
        let is_blank = std::fs::metadata(&self.output_path)
            .map(|meta| meta.len() == 0)
            .unwrap_or(false);
        if is_blank {
            return Ok(Vec::new());
        }
        read_json(&self.output_path, "输出文件")
    }

    /// 读取或解析失败都视为没有旧记录
    pub fn read_previous(&self) -> Vec<Question> {
        match self.load_previous() {
            Ok(previous) => previous,
            Err(e) => {
                warn!("⚠️ 无法读取已有输出，按空列表处理: {}", e);
                Vec::new()
            }
        }
    }

    /// 将本次结果追加到输出文件
    ///
    /// # 返回
    /// 返回写入后的记录总数
    pub fn save(&self, accumulated: &[Question]) -> AppResult<usize> {
        let mut records = self.read_previous();
        let previous = records.len();
        records.extend_from_slice(accumulated);

        let bytes = serde_json::to_vec_pretty(&records).map_err(|source| ParseError::Encode {
            what: "输出记录".to_string(),
            source,
        })?;

        std::fs::write(&self.output_path, bytes)
            .map_err(|e| AppError::file_write_failed(self.output_path.display().to_string(), e))?;

        info!(
            "💾 已保存 {} 条记录 (原有 {} + 新增 {}): {}",
            records.len(),
            previous,
            accumulated.len(),
            self.output_path.display()
        );
        Ok(records.len())
    }
}

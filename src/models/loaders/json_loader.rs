use crate::error::{AppError, AppResult};
use crate::models::question::Question;
use crate::models::RequestTemplate;
use serde::de::DeserializeOwned;
use std::path::Path;

/// 读取整个文件并解析为 JSON
///
/// `what` 只用于错误信息，说明这是哪一类文件
pub fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> AppResult<T> {
    let content = std::fs::read(path)
        .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;

    serde_json::from_slice(&content)
        .map_err(|e| AppError::json_parse_failed(format!("{} ({})", what, path.display()), e))
}

/// 从 JSON 文件加载题目列表
pub fn load_questions(path: &Path) -> AppResult<Vec<Question>> {
    let questions: Vec<Question> = read_json(path, "题目文件")?;
    tracing::info!("成功加载 {} 个题目: {}", questions.len(), path.display());
    Ok(questions)
}

/// 加载请求模板
pub fn load_template(path: &Path) -> AppResult<RequestTemplate> {
    read_json(path, "请求模板")
}

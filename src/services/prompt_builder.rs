//! 请求构建 - 业务能力层
//!
//! 模板 + 单题提示词 → 强类型请求体

use crate::models::{ChatMessage, ChatRequest, Question, RequestTemplate};

/// 拼接在题干后面的指令
pub const REGENERATE_INSTRUCTION: &str = " Read the JSON string and generate different questions as the example question provided. Return the output in latex format";

/// 请求构建器
///
/// 模板只在启动时读取一次，之后被所有 worker 共享
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    template: RequestTemplate,
    default_model: String,
}

impl PromptBuilder {
    pub fn new(template: RequestTemplate, default_model: impl Into<String>) -> Self {
        Self {
            template,
            default_model: default_model.into(),
        }
    }

    /// 系统消息内容
    pub fn system_prompt(question: &Question) -> String {
        format!("{}{}", question.question, REGENERATE_INSTRUCTION)
    }

    /// 构建单题请求
    ///
    /// 模板中的 model 优先于默认模型；messages 始终由构建器生成
    pub fn build(&self, question: &Question) -> ChatRequest {
        let template = self.template.clone();
        ChatRequest {
            model: template
                .model
                .unwrap_or_else(|| self.default_model.clone()),
            messages: vec![ChatMessage::system(Self::system_prompt(question))],
            functions: template.functions,
            function_call: template.function_call,
            temperature: template.temperature,
            max_tokens: template.max_tokens,
            extra: template.extra,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_question() -> Question {
        Question {
            question: "What is $2+2$?".to_string(),
            answer_type: "Open text".to_string(),
            ..Default::default()
        }
    }

    fn template_from(value: serde_json::Value) -> RequestTemplate {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn system_message_appends_instruction() {
        let builder = PromptBuilder::new(RequestTemplate::default(), "gpt-4-0613");
        let request = builder.build(&sample_question());

        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, "system");
        assert_eq!(
            request.messages[0].content,
            "What is $2+2$? Read the JSON string and generate different questions as the example question provided. Return the output in latex format"
        );
    }

    #[test]
    fn template_without_model_uses_default() {
        let template = template_from(json!({
            "functions": [{"name": "generate_question", "parameters": {"type": "object"}}],
            "function_call": {"name": "generate_question"}
        }));
        let builder = PromptBuilder::new(template, "gpt-4-0613");

        let body = serde_json::to_value(builder.build(&sample_question())).unwrap();
        assert_eq!(body["model"], "gpt-4-0613");
        assert_eq!(body["function_call"]["name"], "generate_question");
        assert_eq!(body["messages"][0]["role"], "system");
    }

    #[test]
    fn template_model_wins_over_default() {
        let template = template_from(json!({"model": "gpt-4o"}));
        let builder = PromptBuilder::new(template, "gpt-4-0613");

        assert_eq!(builder.build(&sample_question()).model, "gpt-4o");
    }

    #[test]
    fn template_messages_are_replaced_not_duplicated() {
        let template = template_from(json!({
            "model": "gpt-4",
            "messages": [{"role": "user", "content": "example"}]
        }));
        let builder = PromptBuilder::new(template, "gpt-4-0613");

        let body = serde_json::to_string(&builder.build(&sample_question())).unwrap();
        assert_eq!(body.matches("\"messages\"").count(), 1);
        assert!(!body.contains("example"));

        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["model"], "gpt-4");
        assert_eq!(value["messages"].as_array().unwrap().len(), 1);
        assert_eq!(value["messages"][0]["role"], "system");
        assert!(value["messages"][0]["content"]
            .as_str()
            .unwrap()
            .starts_with("What is $2+2$? Read the JSON string"));
    }

    #[test]
    fn unknown_template_fields_pass_through() {
        let template = template_from(json!({"top_p": 1, "n": 1, "temperature": 0.2}));
        let builder = PromptBuilder::new(template, "gpt-4-0613");

        let body = serde_json::to_value(builder.build(&sample_question())).unwrap();
        assert_eq!(body["top_p"], 1);
        assert_eq!(body["n"], 1);
        assert_eq!(body["temperature"], 0.2);
        assert!(body.get("functions").is_none());
    }
}

use serde::{Deserialize, Serialize};

/// 需要重新生成的题型
pub const OPEN_TEXT: &str = "Open text";

/// 题目记录，字段名与输入/输出文件保持一致
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Question {
    pub title: String,
    pub topic_name: String,
    pub answer_type: String,
    pub mmr: String,
    pub question: String,
    pub answer: String,
    pub values: String,
    pub hints: String,
}

impl Question {
    /// 是否为开放题（只有开放题会被送去重新生成）
    pub fn is_open_text(&self) -> bool {
        self.answer_type == OPEN_TEXT
    }

    /// 用 LLM 生成的内容覆盖题干、答案和提示，其余字段保持不变
    pub fn apply_generated(&mut self, generated: GeneratedQuestion) {
        self.question = generated.question;
        self.answer = generated.correct_answer;
        self.hints = generated.hints;
    }
}

/// LLM 通过函数调用返回的结构化题目
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratedQuestion {
    pub question: String,
    pub correct_answer: String,
    pub hints: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_match_file_format() {
        let raw = r#"{
            "title": "Limits",
            "topicName": "Calculus",
            "answerType": "Open text",
            "mmr": "1200",
            "question": "Evaluate $\\lim_{x\\to0} \\frac{\\sin x}{x}$",
            "answer": "1",
            "values": "",
            "hints": "L'Hopital"
        }"#;

        let q: Question = serde_json::from_str(raw).unwrap();
        assert_eq!(q.topic_name, "Calculus");
        assert!(q.is_open_text());

        let back = serde_json::to_value(&q).unwrap();
        assert_eq!(back["answerType"], "Open text");
        assert_eq!(back["topicName"], "Calculus");
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let q: Question = serde_json::from_str(r#"{"title": "t"}"#).unwrap();
        assert_eq!(q.title, "t");
        assert!(q.hints.is_empty());
        assert!(!q.is_open_text());
    }

    #[test]
    fn answer_type_match_is_exact() {
        let q = Question {
            answer_type: "open text".to_string(),
            ..Default::default()
        };
        assert!(!q.is_open_text());
    }

    #[test]
    fn apply_generated_only_touches_three_fields() {
        let mut q = Question {
            title: "Algebra 1".to_string(),
            topic_name: "Linear equations".to_string(),
            answer_type: OPEN_TEXT.to_string(),
            mmr: "900".to_string(),
            question: "Solve $x + 1 = 2$".to_string(),
            answer: "1".to_string(),
            values: "x".to_string(),
            hints: "subtract".to_string(),
        };
        let before = q.clone();

        q.apply_generated(GeneratedQuestion {
            question: "Solve $2x = 8$".to_string(),
            correct_answer: "4".to_string(),
            hints: "divide by 2".to_string(),
        });

        assert_eq!(q.question, "Solve $2x = 8$");
        assert_eq!(q.answer, "4");
        assert_eq!(q.hints, "divide by 2");
        assert_eq!(q.title, before.title);
        assert_eq!(q.topic_name, before.topic_name);
        assert_eq!(q.answer_type, before.answer_type);
        assert_eq!(q.mmr, before.mmr);
        assert_eq!(q.values, before.values);
    }
}

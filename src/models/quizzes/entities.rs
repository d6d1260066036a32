use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct Quiz {
    pub id: i64,
    pub teacher_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub subject: String,
    pub semester: Option<i32>,
    pub duration_minutes: Option<i32>,
    // 所有题目分值之和
    pub total_marks: i32,
    pub is_published: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct QuizQuestion {
    pub id: i64,
    pub quiz_id: i64,
    // 题目序号，从 0 开始，对应答卷中的位置
    pub position: i32,
    pub question_text: String,
    pub options: Vec<String>,
    // 正确选项下标；学生视角下隐藏
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<i32>,
    pub marks: i32,
}

impl QuizQuestion {
    /// 去掉正确答案，用于学生作答视图
    pub fn redacted(mut self) -> Self {
        self.correct_answer = None;
        self
    }
}

/// 学生提交的答卷，按题目序号索引
///
/// 支持数组 `[2, 0, 1]` 和以序号为键的对象 `{"0": 2, "2": "1"}` 两种形式。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub enum AnswerSheet {
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

impl Default for AnswerSheet {
    fn default() -> Self {
        AnswerSheet::List(Vec::new())
    }
}

impl AnswerSheet {
    /// 取出某个序号的答案；缺失或为 null 时返回 None
    pub fn answer_at(&self, position: usize) -> Option<&Value> {
        let value = match self {
            AnswerSheet::List(values) => values.get(position),
            AnswerSheet::Map(entries) => entries
                .iter()
                .find(|(key, _)| key.parse::<usize>().ok() == Some(position))
                .map(|(_, value)| value),
        };
        value.filter(|v| !v.is_null())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            AnswerSheet::List(values) => values.is_empty(),
            AnswerSheet::Map(entries) => entries.is_empty(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct QuizAttempt {
    pub id: i64,
    pub quiz_id: i64,
    pub student_id: i64,
    pub student_name: Option<String>,
    pub roll_number: Option<String>,
    pub score: i32,
    pub total_marks: i32,
    // 原始答卷
    pub answers: Value,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_answer_sheet_accepts_array() {
        let sheet: AnswerSheet = serde_json::from_value(json!([2, null, "1"])).unwrap();
        assert_eq!(sheet.answer_at(0), Some(&json!(2)));
        assert_eq!(sheet.answer_at(1), None);
        assert_eq!(sheet.answer_at(2), Some(&json!("1")));
        assert_eq!(sheet.answer_at(3), None);
    }

    #[test]
    fn test_answer_sheet_accepts_object_keyed_by_position() {
        let sheet: AnswerSheet =
            serde_json::from_value(json!({"0": 2, "2": "1", "x": 5, "-1": 0})).unwrap();
        assert_eq!(sheet.answer_at(0), Some(&json!(2)));
        assert_eq!(sheet.answer_at(1), None);
        assert_eq!(sheet.answer_at(2), Some(&json!("1")));
    }

    #[test]
    fn test_redacted_question_hides_answer() {
        let question = QuizQuestion {
            id: 1,
            quiz_id: 1,
            position: 0,
            question_text: "2 + 2".to_string(),
            options: vec!["3".into(), "4".into()],
            correct_answer: Some(1),
            marks: 2,
        };
        let json = serde_json::to_value(question.redacted()).unwrap();
        assert!(json.get("correct_answer").is_none());
    }
}

use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/feedback.ts")]
pub struct Feedback {
    pub id: i64,
    // 匿名反馈对教师隐藏学生身份
    pub student_id: Option<i64>,
    pub student_name: Option<String>,
    pub teacher_id: Option<i64>,
    pub teacher_name: Option<String>,
    pub subject: String,
    pub message: String,
    pub rating: Option<i32>,
    pub is_anonymous: bool,
    pub response: Option<String>,
    pub responded_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Feedback {
    pub fn anonymized(mut self) -> Self {
        if self.is_anonymous {
            self.student_id = None;
            self.student_name = None;
        }
        self
    }
}

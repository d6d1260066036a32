use serde::Deserialize;
use ts_rs::TS;

use super::entities::AnswerSheet;
use crate::models::common::pagination::PaginationQuery;

fn default_marks() -> i32 {
    1
}

/// 新题目
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct NewQuestion {
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_answer: i32,
    #[serde(default = "default_marks")]
    pub marks: i32,
}

/// 创建测验请求，可同时附带题目
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct CreateQuizRequest {
    pub title: String,
    pub description: Option<String>,
    pub subject: String,
    pub semester: Option<i32>,
    pub duration_minutes: Option<i32>,
    pub is_published: Option<bool>,
    pub questions: Option<Vec<NewQuestion>>,
}

/// 更新测验请求
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct UpdateQuizRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub subject: Option<String>,
    pub semester: Option<i32>,
    pub duration_minutes: Option<i32>,
    pub is_published: Option<bool>,
}

/// 批量添加题目请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct AddQuestionsRequest {
    pub questions: Vec<NewQuestion>,
}

/// 提交作答请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct SubmitAttemptRequest {
    #[serde(default)]
    pub answers: AnswerSheet,
}

/// 测验列表查询参数（HTTP 请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct QuizListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub subject: Option<String>,
    pub semester: Option<i32>,
    pub teacher_id: Option<i64>,
    pub search: Option<String>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone, Default)]
pub struct QuizListQuery {
    pub page: u64,
    pub size: u64,
    pub subject: Option<String>,
    pub semester: Option<i32>,
    pub teacher_id: Option<i64>,
    pub search: Option<String>,
    pub published_only: bool,
    pub visible_semester: Option<i32>,
}

impl From<QuizListParams> for QuizListQuery {
    fn from(params: QuizListParams) -> Self {
        let (page, size) = params.pagination.normalized();
        Self {
            page,
            size,
            subject: params.subject,
            semester: params.semester,
            teacher_id: params.teacher_id,
            search: params.search,
            published_only: false,
            visible_semester: None,
        }
    }
}

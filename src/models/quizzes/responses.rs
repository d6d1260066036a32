use serde::Serialize;
use ts_rs::TS;

use super::entities::{Quiz, QuizAttempt, QuizQuestion};
use crate::models::common::pagination::PaginationInfo;

/// 测验列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct QuizListResponse {
    pub items: Vec<Quiz>,
    pub pagination: PaginationInfo,
}

/// 测验详情（含题目）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct QuizDetailResponse {
    pub quiz: Quiz,
    pub questions: Vec<QuizQuestion>,
    /// 学生视角：是否已作答
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempted: Option<bool>,
}

/// 题目列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct QuestionListResponse {
    pub items: Vec<QuizQuestion>,
    pub total_marks: i32,
}

/// 作答结果
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct AttemptResultResponse {
    pub attempt: QuizAttempt,
    pub score: i32,
    pub total_marks: i32,
    pub correct_count: i32,
    pub question_count: i32,
}

/// 某测验的全部作答
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct AttemptListResponse {
    pub items: Vec<QuizAttempt>,
}

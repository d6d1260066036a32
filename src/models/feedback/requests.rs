use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::pagination::PaginationQuery;

/// 提交反馈请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/feedback.ts")]
pub struct CreateFeedbackRequest {
    pub teacher_id: Option<i64>,
    pub subject: String,
    pub message: String,
    pub rating: Option<i32>,
    #[serde(default)]
    pub is_anonymous: bool,
}

/// 回复反馈请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/feedback.ts")]
pub struct RespondFeedbackRequest {
    pub response: String,
}

/// 反馈列表查询参数（HTTP 请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/feedback.ts")]
pub struct FeedbackListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub teacher_id: Option<i64>,
    pub responded: Option<bool>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone, Default)]
pub struct FeedbackListQuery {
    pub page: u64,
    pub size: u64,
    pub teacher_id: Option<i64>,
    pub student_id: Option<i64>,
    pub responded: Option<bool>,
}

impl From<FeedbackListParams> for FeedbackListQuery {
    fn from(params: FeedbackListParams) -> Self {
        let (page, size) = params.pagination.normalized();
        Self {
            page,
            size,
            teacher_id: params.teacher_id,
            student_id: None,
            responded: params.responded,
        }
    }
}

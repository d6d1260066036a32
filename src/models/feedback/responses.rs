use serde::Serialize;
use ts_rs::TS;

use super::entities::Feedback;
use crate::models::common::pagination::PaginationInfo;

/// 反馈列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/feedback.ts")]
pub struct FeedbackListResponse {
    pub items: Vec<Feedback>,
    pub pagination: PaginationInfo,
}

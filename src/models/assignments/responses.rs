use serde::Serialize;
use ts_rs::TS;

use super::entities::{Assignment, AssignmentSubmission};
use crate::models::common::pagination::PaginationInfo;

/// 作业列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignmentListResponse {
    pub items: Vec<Assignment>,
    pub pagination: PaginationInfo,
}

/// 某作业的全部提交
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct SubmissionListResponse {
    pub items: Vec<AssignmentSubmission>,
}

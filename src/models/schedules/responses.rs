use serde::Serialize;
use ts_rs::TS;

use super::entities::Schedule;
use crate::models::common::pagination::PaginationInfo;

/// 日程列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/schedule.ts")]
pub struct ScheduleListResponse {
    pub items: Vec<Schedule>,
    pub pagination: PaginationInfo,
}

use serde::Serialize;
use ts_rs::TS;

use super::entities::StartupIdea;
use crate::models::common::pagination::PaginationInfo;

/// 创业想法列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/startup_idea.ts")]
pub struct StartupIdeaListResponse {
    pub items: Vec<StartupIdea>,
    pub pagination: PaginationInfo,
}

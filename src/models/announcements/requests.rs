use serde::Deserialize;
use ts_rs::TS;

use super::entities::AnnouncementPriority;
use crate::models::common::pagination::PaginationQuery;
use crate::models::users::entities::UserRole;

fn default_audience() -> String {
    crate::models::schedules::audience::EVERYONE.to_string()
}

/// 发布公告请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/announcement.ts")]
pub struct CreateAnnouncementRequest {
    pub title: String,
    pub content: String,
    #[serde(default = "default_audience")]
    pub target_audience: String,
    pub priority: Option<AnnouncementPriority>,
}

/// 更新公告请求
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/announcement.ts")]
pub struct UpdateAnnouncementRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub target_audience: Option<String>,
    pub priority: Option<AnnouncementPriority>,
}

/// 公告列表查询参数（HTTP 请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/announcement.ts")]
pub struct AnnouncementListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub priority: Option<AnnouncementPriority>,
    pub search: Option<String>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone, Default)]
pub struct AnnouncementListQuery {
    pub page: u64,
    pub size: u64,
    pub priority: Option<AnnouncementPriority>,
    pub search: Option<String>,
    pub visible_audiences: Option<Vec<String>>,
    pub author: Option<(i64, UserRole)>,
}

impl From<AnnouncementListParams> for AnnouncementListQuery {
    fn from(params: AnnouncementListParams) -> Self {
        let (page, size) = params.pagination.normalized();
        Self {
            page,
            size,
            priority: params.priority,
            search: params.search,
            visible_audiences: None,
            author: None,
        }
    }
}

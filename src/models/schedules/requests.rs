use chrono::{DateTime, Utc};
use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::pagination::PaginationQuery;
use crate::models::users::entities::UserRole;

fn default_event_type() -> String {
    "class".to_string()
}

fn default_audience() -> String {
    super::audience::EVERYONE.to_string()
}

/// 创建日程请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/schedule.ts")]
pub struct CreateScheduleRequest {
    pub title: String,
    pub description: Option<String>,
    #[serde(default = "default_event_type")]
    pub event_type: String,
    pub start_time: DateTime<Utc>, // ISO 8601
    pub end_time: Option<DateTime<Utc>>,
    pub location: Option<String>,
    #[serde(default = "default_audience")]
    pub target_audience: String,
}

/// 更新日程请求
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/schedule.ts")]
pub struct UpdateScheduleRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub event_type: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub target_audience: Option<String>,
}

/// 日程列表查询参数（HTTP 请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/schedule.ts")]
pub struct ScheduleListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub event_type: Option<String>,
    /// 起始时间下界（含）
    pub from: Option<DateTime<Utc>>,
    /// 起始时间上界（含）
    pub to: Option<DateTime<Utc>>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone, Default)]
pub struct ScheduleListQuery {
    pub page: u64,
    pub size: u64,
    pub event_type: Option<String>,
    pub from: Option<i64>,
    pub to: Option<i64>,
    /// 非管理员只能看到这些受众标签的日程
    pub visible_audiences: Option<Vec<String>>,
    /// 创建者本人总能看到自己创建的日程
    pub creator: Option<(i64, UserRole)>,
}

impl From<ScheduleListParams> for ScheduleListQuery {
    fn from(params: ScheduleListParams) -> Self {
        let (page, size) = params.pagination.normalized();
        Self {
            page,
            size,
            event_type: params.event_type,
            from: params.from.map(|t| t.timestamp()),
            to: params.to.map(|t| t.timestamp()),
            visible_audiences: None,
            creator: None,
        }
    }
}

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::users::entities::UserRole;

// 公告优先级
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/announcement.ts")]
pub enum AnnouncementPriority {
    Low,
    #[default]
    Normal,
    High,
}

impl std::fmt::Display for AnnouncementPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnnouncementPriority::Low => write!(f, "low"),
            AnnouncementPriority::Normal => write!(f, "normal"),
            AnnouncementPriority::High => write!(f, "high"),
        }
    }
}

impl std::str::FromStr for AnnouncementPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(AnnouncementPriority::Low),
            "normal" => Ok(AnnouncementPriority::Normal),
            "high" => Ok(AnnouncementPriority::High),
            _ => Err(format!("无效的公告优先级: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/announcement.ts")]
pub struct Announcement {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author_id: i64,
    pub author_role: UserRole,
    pub target_audience: String,
    pub priority: AnnouncementPriority,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

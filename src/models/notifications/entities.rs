use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::users::entities::UserRole;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub struct Notification {
    pub id: i64,
    pub recipient_id: i64,
    pub recipient_role: UserRole,
    // schedule / announcement / ...
    pub notification_type: String,
    pub title: String,
    pub message: String,
    // 前端跳转链接
    pub link: Option<String>,
    pub is_read: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// 待批量写入的通知
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotification {
    pub recipient_id: i64,
    pub recipient_role: UserRole,
    pub notification_type: String,
    pub title: String,
    pub message: String,
    pub link: Option<String>,
}

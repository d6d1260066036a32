//! 通知实体

use sea_orm::entity::prelude::*;

use super::to_datetime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub recipient_id: i64,
    pub recipient_role: String,
    pub notification_type: String,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    pub link: Option<String>,
    pub is_read: bool,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_notification(self) -> crate::models::notifications::entities::Notification {
        use crate::models::notifications::entities::Notification;
        use crate::models::users::entities::UserRole;

        Notification {
            id: self.id,
            recipient_id: self.recipient_id,
            recipient_role: self.recipient_role.parse().unwrap_or(UserRole::Student),
            notification_type: self.notification_type,
            title: self.title,
            message: self.message,
            link: self.link,
            is_read: self.is_read,
            created_at: to_datetime(self.created_at),
        }
    }
}

//! 公告实体

use sea_orm::entity::prelude::*;

use super::to_datetime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "announcements")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub author_id: i64,
    pub author_role: String,
    pub target_audience: String,
    pub priority: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_announcement(self) -> crate::models::announcements::entities::Announcement {
        use crate::models::announcements::entities::{Announcement, AnnouncementPriority};
        use crate::models::users::entities::UserRole;

        Announcement {
            id: self.id,
            title: self.title,
            content: self.content,
            author_id: self.author_id,
            author_role: self.author_role.parse().unwrap_or(UserRole::Admin),
            target_audience: self.target_audience,
            priority: self.priority.parse().unwrap_or(AnnouncementPriority::Normal),
            created_at: to_datetime(self.created_at),
            updated_at: to_datetime(self.updated_at),
        }
    }
}

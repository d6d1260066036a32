//! 日程实体

use sea_orm::entity::prelude::*;

use super::{to_datetime, to_datetime_opt};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "schedules")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub event_type: String,
    pub start_time: i64,
    pub end_time: Option<i64>,
    pub location: Option<String>,
    pub target_audience: String,
    pub created_by: i64,
    pub creator_role: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_schedule(self) -> crate::models::schedules::entities::Schedule {
        use crate::models::schedules::entities::Schedule;
        use crate::models::users::entities::UserRole;

        Schedule {
            id: self.id,
            title: self.title,
            description: self.description,
            event_type: self.event_type,
            start_time: to_datetime(self.start_time),
            end_time: to_datetime_opt(self.end_time),
            location: self.location,
            target_audience: self.target_audience,
            created_by: self.created_by,
            creator_role: self.creator_role.parse().unwrap_or(UserRole::Admin),
            created_at: to_datetime(self.created_at),
            updated_at: to_datetime(self.updated_at),
        }
    }
}

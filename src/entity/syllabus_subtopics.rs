//! 教学大纲子主题实体

use sea_orm::entity::prelude::*;

use super::to_datetime_opt;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "syllabus_subtopics")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub topic_id: i64,
    pub title: String,
    pub position: i32,
    pub is_completed: bool,
    pub completed_at: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::syllabus_topics::Entity",
        from = "Column::TopicId",
        to = "super::syllabus_topics::Column::Id"
    )]
    Topic,
}

impl Related<super::syllabus_topics::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Topic.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_subtopic(self) -> crate::models::syllabus::entities::SyllabusSubtopic {
        use crate::models::syllabus::entities::SyllabusSubtopic;

        SyllabusSubtopic {
            id: self.id,
            topic_id: self.topic_id,
            title: self.title,
            position: self.position,
            is_completed: self.is_completed,
            completed_at: to_datetime_opt(self.completed_at),
        }
    }
}

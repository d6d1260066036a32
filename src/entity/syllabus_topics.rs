//! 教学大纲主题实体

use sea_orm::entity::prelude::*;

use super::to_datetime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "syllabus_topics")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub teacher_id: i64,
    pub subject: String,
    pub semester: Option<i32>,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub position: i32,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::teachers::Entity",
        from = "Column::TeacherId",
        to = "super::teachers::Column::Id"
    )]
    Teacher,
    #[sea_orm(has_many = "super::syllabus_subtopics::Entity")]
    Subtopics,
}

impl Related<super::teachers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl Related<super::syllabus_subtopics::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subtopics.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_topic(
        self,
        subtopics: Vec<super::syllabus_subtopics::Model>,
    ) -> crate::models::syllabus::entities::SyllabusTopic {
        use crate::models::syllabus::entities::SyllabusTopic;

        SyllabusTopic {
            id: self.id,
            teacher_id: self.teacher_id,
            subject: self.subject,
            semester: self.semester,
            title: self.title,
            description: self.description,
            position: self.position,
            subtopics: subtopics.into_iter().map(|s| s.into_subtopic()).collect(),
            created_at: to_datetime(self.created_at),
            updated_at: to_datetime(self.updated_at),
        }
    }
}

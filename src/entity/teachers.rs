//! 教师实体

use sea_orm::entity::prelude::*;

use super::to_datetime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "teachers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub department: Option<String>,
    pub designation: Option<String>,
    pub phone: Option<String>,
    pub status: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::materials::Entity")]
    Materials,
    #[sea_orm(has_many = "super::assignments::Entity")]
    Assignments,
    #[sea_orm(has_many = "super::quizzes::Entity")]
    Quizzes,
    #[sea_orm(has_many = "super::syllabus_topics::Entity")]
    SyllabusTopics,
}

impl Related<super::materials::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Materials.def()
    }
}

impl Related<super::assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignments.def()
    }
}

impl Related<super::quizzes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Quizzes.def()
    }
}

impl Related<super::syllabus_topics::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SyllabusTopics.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_teacher(self) -> crate::models::teachers::entities::Teacher {
        use crate::models::teachers::entities::Teacher;
        use crate::models::users::entities::AccountStatus;

        Teacher {
            id: self.id,
            name: self.name,
            email: self.email,
            department: self.department,
            designation: self.designation,
            phone: self.phone,
            status: self.status.parse().unwrap_or(AccountStatus::Inactive),
            created_at: to_datetime(self.created_at),
            updated_at: to_datetime(self.updated_at),
        }
    }

    pub fn into_account(self) -> crate::models::users::entities::Account {
        use crate::models::users::entities::{Account, AccountStatus, AuthUser, UserRole};

        Account {
            user: AuthUser {
                id: self.id,
                role: UserRole::Teacher,
                name: self.name,
                email: self.email,
                semester: None,
                status: self.status.parse().unwrap_or(AccountStatus::Inactive),
            },
            password_hash: self.password_hash,
        }
    }
}

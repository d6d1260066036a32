//! 学生实体

use sea_orm::entity::prelude::*;

use super::to_datetime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    #[sea_orm(unique)]
    pub roll_number: Option<String>,
    pub semester: i32,
    pub department: Option<String>,
    pub phone: Option<String>,
    pub status: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::assignment_submissions::Entity")]
    AssignmentSubmissions,
    #[sea_orm(has_many = "super::quiz_attempts::Entity")]
    QuizAttempts,
    #[sea_orm(has_many = "super::feedback::Entity")]
    Feedback,
    #[sea_orm(has_many = "super::startup_ideas::Entity")]
    StartupIdeas,
}

impl Related<super::assignment_submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AssignmentSubmissions.def()
    }
}

impl Related<super::quiz_attempts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::QuizAttempts.def()
    }
}

impl Related<super::feedback::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Feedback.def()
    }
}

impl Related<super::startup_ideas::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StartupIdeas.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_student(self) -> crate::models::students::entities::Student {
        use crate::models::students::entities::Student;
        use crate::models::users::entities::AccountStatus;

        Student {
            id: self.id,
            name: self.name,
            email: self.email,
            roll_number: self.roll_number,
            semester: self.semester,
            department: self.department,
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
                role: UserRole::Student,
                name: self.name,
                email: self.email,
                semester: Some(self.semester),
                status: self.status.parse().unwrap_or(AccountStatus::Inactive),
            },
            password_hash: self.password_hash,
        }
    }
}

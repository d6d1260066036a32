//! 管理员实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "admins")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub last_login: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_account(self) -> crate::models::users::entities::Account {
        use crate::models::users::entities::{Account, AccountStatus, AuthUser, UserRole};

        Account {
            user: AuthUser {
                id: self.id,
                role: UserRole::Admin,
                name: self.name,
                email: self.email,
                semester: None,
                status: AccountStatus::Active,
            },
            password_hash: self.password_hash,
        }
    }
}

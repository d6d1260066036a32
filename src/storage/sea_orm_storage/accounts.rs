//! 账号存储操作（学生、教师、管理员三张表）

use super::{SeaOrmStorage, write_error};
use crate::entity::{admins, students, teachers};
use crate::errors::{LmsError, Result};
use crate::models::users::entities::{Account, UserRole};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set,
    sea_query::Expr,
};

impl SeaOrmStorage {
    /// 按角色和邮箱查找账号
    pub async fn get_account_by_email_impl(
        &self,
        role: UserRole,
        email: &str,
    ) -> Result<Option<Account>> {
        let account = match role {
            UserRole::Student => students::Entity::find()
                .filter(students::Column::Email.eq(email))
                .one(&self.db)
                .await
                .map(|m| m.map(|m| m.into_account())),
            UserRole::Teacher => teachers::Entity::find()
                .filter(teachers::Column::Email.eq(email))
                .one(&self.db)
                .await
                .map(|m| m.map(|m| m.into_account())),
            UserRole::Admin => admins::Entity::find()
                .filter(admins::Column::Email.eq(email))
                .one(&self.db)
                .await
                .map(|m| m.map(|m| m.into_account())),
        };

        account.map_err(|e| LmsError::database_operation(format!("查询账号失败: {e}")))
    }

    /// 按角色和 ID 查找账号
    pub async fn get_account_by_id_impl(&self, role: UserRole, id: i64) -> Result<Option<Account>> {
        let account = match role {
            UserRole::Student => students::Entity::find_by_id(id)
                .one(&self.db)
                .await
                .map(|m| m.map(|m| m.into_account())),
            UserRole::Teacher => teachers::Entity::find_by_id(id)
                .one(&self.db)
                .await
                .map(|m| m.map(|m| m.into_account())),
            UserRole::Admin => admins::Entity::find_by_id(id)
                .one(&self.db)
                .await
                .map(|m| m.map(|m| m.into_account())),
        };

        account.map_err(|e| LmsError::database_operation(format!("查询账号失败: {e}")))
    }

    /// 更新密码哈希
    pub async fn update_account_password_impl(
        &self,
        role: UserRole,
        id: i64,
        password_hash: &str,
    ) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = match role {
            UserRole::Student => {
                students::Entity::update_many()
                    .col_expr(students::Column::PasswordHash, Expr::value(password_hash))
                    .col_expr(students::Column::UpdatedAt, Expr::value(now))
                    .filter(students::Column::Id.eq(id))
                    .exec(&self.db)
                    .await
            }
            UserRole::Teacher => {
                teachers::Entity::update_many()
                    .col_expr(teachers::Column::PasswordHash, Expr::value(password_hash))
                    .col_expr(teachers::Column::UpdatedAt, Expr::value(now))
                    .filter(teachers::Column::Id.eq(id))
                    .exec(&self.db)
                    .await
            }
            UserRole::Admin => {
                admins::Entity::update_many()
                    .col_expr(admins::Column::PasswordHash, Expr::value(password_hash))
                    .col_expr(admins::Column::UpdatedAt, Expr::value(now))
                    .filter(admins::Column::Id.eq(id))
                    .exec(&self.db)
                    .await
            }
        }
        .map_err(|e| LmsError::database_operation(format!("更新密码失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 更新管理员最后登录时间
    pub async fn update_admin_last_login_impl(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = admins::Entity::update_many()
            .col_expr(admins::Column::LastLogin, Expr::value(now))
            .filter(admins::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("更新最后登录时间失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count_admins_impl(&self) -> Result<u64> {
        admins::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询管理员数量失败: {e}")))
    }

    /// 创建管理员
    pub async fn create_admin_impl(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<Account> {
        let now = chrono::Utc::now().timestamp();

        let model = admins::ActiveModel {
            name: Set(name.to_string()),
            email: Set(email.to_string()),
            password_hash: Set(password_hash.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| write_error("创建管理员失败", e))?;

        Ok(result.into_account())
    }
}

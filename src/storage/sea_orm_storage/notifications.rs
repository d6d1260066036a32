//! 通知存储操作

use super::SeaOrmStorage;
use crate::entity::notifications::{ActiveModel, Column, Entity as Notifications};
use crate::errors::{LmsError, Result};
use crate::models::{
    PaginationInfo,
    notifications::{
        entities::{NewNotification, Notification},
        requests::NotificationListQuery,
        responses::NotificationListResponse,
    },
    users::entities::UserRole,
};
use sea_orm::{
    ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

/// 单条 INSERT 的最大行数。每行 8 个绑定参数，需低于 SQLite / MySQL 的参数上限
const NOTIFICATION_CHUNK_SIZE: usize = 500;

impl SeaOrmStorage {
    /// 批量创建通知，按块写入，整体在同一事务内
    pub async fn create_notifications_batch_impl(
        &self,
        notifications: Vec<NewNotification>,
    ) -> Result<u64> {
        if notifications.is_empty() {
            return Ok(0);
        }

        let now = chrono::Utc::now().timestamp();
        let count = notifications.len() as u64;
        let mut models = notifications.into_iter().map(|n| ActiveModel {
            recipient_id: Set(n.recipient_id),
            recipient_role: Set(n.recipient_role.to_string()),
            notification_type: Set(n.notification_type),
            title: Set(n.title),
            message: Set(n.message),
            link: Set(n.link),
            is_read: Set(false),
            created_at: Set(now),
            ..Default::default()
        });

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| LmsError::database_operation(format!("开启事务失败: {e}")))?;

        loop {
            let chunk: Vec<ActiveModel> =
                models.by_ref().take(NOTIFICATION_CHUNK_SIZE).collect();
            if chunk.is_empty() {
                break;
            }
            // 失败时 txn 被 drop，已写入的块一并回滚
            Notifications::insert_many(chunk)
                .exec(&txn)
                .await
                .map_err(|e| LmsError::database_operation(format!("批量创建通知失败: {e}")))?;
        }

        txn.commit()
            .await
            .map_err(|e| LmsError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(count)
    }

    pub async fn get_notification_by_id_impl(&self, id: i64) -> Result<Option<Notification>> {
        let result = Notifications::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询通知失败: {e}")))?;

        Ok(result.map(|m| m.into_notification()))
    }

    /// 列出用户通知（分页）
    pub async fn list_notifications_with_pagination_impl(
        &self,
        query: NotificationListQuery,
    ) -> Result<NotificationListResponse> {
        let mut select = Notifications::find()
            .filter(Column::RecipientId.eq(query.recipient_id))
            .filter(Column::RecipientRole.eq(query.recipient_role.to_string()));

        if query.unread_only {
            select = select.filter(Column::IsRead.eq(false));
        }

        select = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);

        let paginator = select.paginate(&self.db, query.size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| LmsError::database_operation(format!("查询通知总数失败: {e}")))?;

        let notifications = paginator
            .fetch_page(query.page - 1)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询通知列表失败: {e}")))?;

        Ok(NotificationListResponse {
            items: notifications
                .into_iter()
                .map(|m| m.into_notification())
                .collect(),
            pagination: PaginationInfo::new(query.page, query.size, total),
        })
    }

    /// 获取用户未读通知数量
    pub async fn get_unread_notification_count_impl(
        &self,
        recipient_id: i64,
        recipient_role: UserRole,
    ) -> Result<i64> {
        let count = Notifications::find()
            .filter(Column::RecipientId.eq(recipient_id))
            .filter(Column::RecipientRole.eq(recipient_role.to_string()))
            .filter(Column::IsRead.eq(false))
            .count(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询未读通知数量失败: {e}")))?;

        Ok(count as i64)
    }

    /// 标记通知为已读
    pub async fn mark_notification_as_read_impl(&self, id: i64) -> Result<bool> {
        let result = Notifications::update_many()
            .col_expr(Column::IsRead, sea_orm::sea_query::Expr::value(true))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("标记通知已读失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 标记用户所有通知为已读
    pub async fn mark_all_notifications_as_read_impl(
        &self,
        recipient_id: i64,
        recipient_role: UserRole,
    ) -> Result<i64> {
        let result = Notifications::update_many()
            .col_expr(Column::IsRead, sea_orm::sea_query::Expr::value(true))
            .filter(Column::RecipientId.eq(recipient_id))
            .filter(Column::RecipientRole.eq(recipient_role.to_string()))
            .filter(Column::IsRead.eq(false))
            .exec(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("标记全部通知已读失败: {e}")))?;

        Ok(result.rows_affected as i64)
    }

    /// 删除通知
    pub async fn delete_notification_impl(&self, id: i64) -> Result<bool> {
        let result = Notifications::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("删除通知失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

//! 公告存储操作

use super::SeaOrmStorage;
use crate::entity::announcements::{ActiveModel, Column, Entity as Announcements};
use crate::errors::{LmsError, Result};
use crate::models::{
    PaginationInfo,
    announcements::{
        entities::{Announcement, AnnouncementPriority},
        requests::{AnnouncementListQuery, CreateAnnouncementRequest, UpdateAnnouncementRequest},
        responses::AnnouncementListResponse,
    },
    users::entities::UserRole,
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    pub async fn create_announcement_impl(
        &self,
        author_id: i64,
        author_role: UserRole,
        req: CreateAnnouncementRequest,
    ) -> Result<Announcement> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            title: Set(req.title),
            content: Set(req.content),
            author_id: Set(author_id),
            author_role: Set(author_role.to_string()),
            target_audience: Set(req.target_audience),
            priority: Set(req.priority.unwrap_or_default().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("创建公告失败: {e}")))?;

        Ok(result.into_announcement())
    }

    pub async fn get_announcement_by_id_impl(&self, id: i64) -> Result<Option<Announcement>> {
        let result = Announcements::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询公告失败: {e}")))?;

        Ok(result.map(|m| m.into_announcement()))
    }

    /// 分页列出公告，高优先级在前
    pub async fn list_announcements_with_pagination_impl(
        &self,
        query: AnnouncementListQuery,
    ) -> Result<AnnouncementListResponse> {
        let mut select = Announcements::find();

        // 受众可见性：受众匹配或本人发布
        if let Some(labels) = query.visible_audiences {
            let mut visible = Condition::any().add(Column::TargetAudience.is_in(labels));
            if let Some((author_id, author_role)) = query.author {
                visible = visible.add(
                    Condition::all()
                        .add(Column::AuthorId.eq(author_id))
                        .add(Column::AuthorRole.eq(author_role.to_string())),
                );
            }
            select = select.filter(visible);
        }

        if let Some(priority) = query.priority {
            select = select.filter(Column::Priority.eq(priority.to_string()));
        }

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Title.contains(&escaped))
                    .add(Column::Content.contains(&escaped)),
            );
        }

        select = select.order_by_desc(Column::CreatedAt);

        let paginator = select.paginate(&self.db, query.size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| LmsError::database_operation(format!("查询公告总数失败: {e}")))?;

        let mut items: Vec<Announcement> = paginator
            .fetch_page(query.page - 1)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询公告列表失败: {e}")))?
            .into_iter()
            .map(|m| m.into_announcement())
            .collect();

        // 页内按优先级稳定排序，同优先级保持时间倒序
        items.sort_by_key(|a| match a.priority {
            AnnouncementPriority::High => 0,
            AnnouncementPriority::Normal => 1,
            AnnouncementPriority::Low => 2,
        });

        Ok(AnnouncementListResponse {
            items,
            pagination: PaginationInfo::new(query.page, query.size, total),
        })
    }

    pub async fn update_announcement_impl(
        &self,
        id: i64,
        update: UpdateAnnouncementRequest,
    ) -> Result<Option<Announcement>> {
        if self.get_announcement_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(content) = update.content {
            model.content = Set(content);
        }
        if let Some(target_audience) = update.target_audience {
            model.target_audience = Set(target_audience);
        }
        if let Some(priority) = update.priority {
            model.priority = Set(priority.to_string());
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("更新公告失败: {e}")))?;

        Ok(Some(result.into_announcement()))
    }

    pub async fn delete_announcement_impl(&self, id: i64) -> Result<bool> {
        let result = Announcements::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("删除公告失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

//! 创业想法存储操作

use super::SeaOrmStorage;
use crate::entity::startup_ideas::{ActiveModel, Column, Entity as StartupIdeas};
use crate::entity::students::Entity as Students;
use crate::errors::{LmsError, Result};
use crate::models::{
    PaginationInfo,
    startup_ideas::{
        entities::{IdeaStatus, StartupIdea},
        requests::{CreateStartupIdeaRequest, StartupIdeaListQuery, UpdateStartupIdeaRequest},
        responses::StartupIdeaListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    pub async fn create_startup_idea_impl(
        &self,
        student_id: i64,
        req: CreateStartupIdeaRequest,
    ) -> Result<StartupIdea> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            student_id: Set(student_id),
            title: Set(req.title),
            description: Set(req.description),
            category: Set(req.category),
            status: Set(IdeaStatus::Pending.to_string()),
            reviewer_comment: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("创建创业想法失败: {e}")))?;

        Ok(result.into_idea(None))
    }

    pub async fn get_startup_idea_by_id_impl(&self, id: i64) -> Result<Option<StartupIdea>> {
        let result = StartupIdeas::find_by_id(id)
            .find_also_related(Students)
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询创业想法失败: {e}")))?;

        Ok(result.map(|(m, student)| m.into_idea(student)))
    }

    pub async fn list_startup_ideas_with_pagination_impl(
        &self,
        query: StartupIdeaListQuery,
    ) -> Result<StartupIdeaListResponse> {
        let mut select = StartupIdeas::find();

        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }
        if let Some(ref category) = query.category {
            select = select.filter(Column::Category.eq(category.as_str()));
        }
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Title.contains(&escaped))
                    .add(Column::Description.contains(&escaped)),
            );
        }

        let paginator = select
            .order_by_desc(Column::CreatedAt)
            .find_also_related(Students)
            .paginate(&self.db, query.size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| LmsError::database_operation(format!("查询创业想法总数失败: {e}")))?;

        let rows = paginator
            .fetch_page(query.page - 1)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询创业想法列表失败: {e}")))?;

        Ok(StartupIdeaListResponse {
            items: rows
                .into_iter()
                .map(|(m, student)| m.into_idea(student))
                .collect(),
            pagination: PaginationInfo::new(query.page, query.size, total),
        })
    }

    pub async fn update_startup_idea_impl(
        &self,
        id: i64,
        update: UpdateStartupIdeaRequest,
    ) -> Result<Option<StartupIdea>> {
        if self.get_startup_idea_by_id_impl(id).await?.is_none() {
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
        if let Some(description) = update.description {
            model.description = Set(description);
        }
        if let Some(category) = update.category {
            model.category = Set(Some(category));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("更新创业想法失败: {e}")))?;

        self.get_startup_idea_by_id_impl(id).await
    }

    pub async fn review_startup_idea_impl(
        &self,
        id: i64,
        status: IdeaStatus,
        reviewer_comment: Option<String>,
    ) -> Result<Option<StartupIdea>> {
        if self.get_startup_idea_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            status: Set(status.to_string()),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };
        if reviewer_comment.is_some() {
            model.reviewer_comment = Set(reviewer_comment);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("审核创业想法失败: {e}")))?;

        self.get_startup_idea_by_id_impl(id).await
    }

    pub async fn delete_startup_idea_impl(&self, id: i64) -> Result<bool> {
        let result = StartupIdeas::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("删除创业想法失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

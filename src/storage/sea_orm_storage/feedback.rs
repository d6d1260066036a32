//! 反馈存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::feedback::{ActiveModel, Column, Entity as FeedbackEntity, Model};
use crate::entity::{students, teachers};
use crate::errors::{LmsError, Result};
use crate::models::{
    PaginationInfo,
    feedback::{
        entities::Feedback,
        requests::{CreateFeedbackRequest, FeedbackListQuery},
        responses::FeedbackListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

impl SeaOrmStorage {
    /// 批量补齐学生与教师姓名
    async fn attach_feedback_names(&self, rows: Vec<Model>) -> Result<Vec<Feedback>> {
        let student_ids: Vec<i64> = rows.iter().map(|r| r.student_id).collect();
        let teacher_ids: Vec<i64> = rows.iter().filter_map(|r| r.teacher_id).collect();

        let student_names: HashMap<i64, String> = if student_ids.is_empty() {
            HashMap::new()
        } else {
            students::Entity::find()
                .select_only()
                .column(students::Column::Id)
                .column(students::Column::Name)
                .filter(students::Column::Id.is_in(student_ids))
                .into_tuple::<(i64, String)>()
                .all(&self.db)
                .await
                .map_err(|e| LmsError::database_operation(format!("查询学生姓名失败: {e}")))?
                .into_iter()
                .collect()
        };

        let teacher_names: HashMap<i64, String> = if teacher_ids.is_empty() {
            HashMap::new()
        } else {
            teachers::Entity::find()
                .select_only()
                .column(teachers::Column::Id)
                .column(teachers::Column::Name)
                .filter(teachers::Column::Id.is_in(teacher_ids))
                .into_tuple::<(i64, String)>()
                .all(&self.db)
                .await
                .map_err(|e| LmsError::database_operation(format!("查询教师姓名失败: {e}")))?
                .into_iter()
                .collect()
        };

        Ok(rows
            .into_iter()
            .map(|r| {
                let student_name = student_names.get(&r.student_id).cloned();
                let teacher_name = r.teacher_id.and_then(|id| teacher_names.get(&id).cloned());
                r.into_feedback(student_name, teacher_name)
            })
            .collect())
    }

    pub async fn create_feedback_impl(
        &self,
        student_id: i64,
        req: CreateFeedbackRequest,
    ) -> Result<Feedback> {
        let model = ActiveModel {
            student_id: Set(student_id),
            teacher_id: Set(req.teacher_id),
            subject: Set(req.subject),
            message: Set(req.message),
            rating: Set(req.rating),
            is_anonymous: Set(req.is_anonymous),
            response: Set(None),
            responded_at: Set(None),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("创建反馈失败: {e}")))?;

        let mut items = self.attach_feedback_names(vec![result]).await?;
        items
            .pop()
            .ok_or_else(|| LmsError::database_operation("创建反馈后读取失败"))
    }

    pub async fn get_feedback_by_id_impl(&self, id: i64) -> Result<Option<Feedback>> {
        let result = FeedbackEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询反馈失败: {e}")))?;

        match result {
            Some(row) => Ok(self.attach_feedback_names(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    pub async fn list_feedback_with_pagination_impl(
        &self,
        query: FeedbackListQuery,
    ) -> Result<FeedbackListResponse> {
        let mut select = FeedbackEntity::find();

        if let Some(teacher_id) = query.teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }
        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        match query.responded {
            Some(true) => select = select.filter(Column::Response.is_not_null()),
            Some(false) => select = select.filter(Column::Response.is_null()),
            None => {}
        }

        select = select.order_by_desc(Column::CreatedAt);

        let paginator = select.paginate(&self.db, query.size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| LmsError::database_operation(format!("查询反馈总数失败: {e}")))?;

        let rows = paginator
            .fetch_page(query.page - 1)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询反馈列表失败: {e}")))?;

        Ok(FeedbackListResponse {
            items: self.attach_feedback_names(rows).await?,
            pagination: PaginationInfo::new(query.page, query.size, total),
        })
    }

    pub async fn respond_feedback_impl(
        &self,
        id: i64,
        response: String,
    ) -> Result<Option<Feedback>> {
        let existing = FeedbackEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询反馈失败: {e}")))?;
        if existing.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(id),
            response: Set(Some(response)),
            responded_at: Set(Some(chrono::Utc::now().timestamp())),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("回复反馈失败: {e}")))?;

        Ok(self.attach_feedback_names(vec![result]).await?.pop())
    }

    pub async fn delete_feedback_impl(&self, id: i64) -> Result<bool> {
        let result = FeedbackEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("删除反馈失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

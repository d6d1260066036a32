//! 日程存储操作

use super::SeaOrmStorage;
use crate::entity::schedules::{ActiveModel, Column, Entity as Schedules};
use crate::errors::{LmsError, Result};
use crate::models::{
    PaginationInfo,
    schedules::{
        entities::Schedule,
        requests::{CreateScheduleRequest, ScheduleListQuery, UpdateScheduleRequest},
        responses::ScheduleListResponse,
    },
    users::entities::UserRole,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    pub async fn create_schedule_impl(
        &self,
        created_by: i64,
        creator_role: UserRole,
        req: CreateScheduleRequest,
    ) -> Result<Schedule> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            title: Set(req.title),
            description: Set(req.description),
            event_type: Set(req.event_type),
            start_time: Set(req.start_time.timestamp()),
            end_time: Set(req.end_time.map(|t| t.timestamp())),
            location: Set(req.location),
            target_audience: Set(req.target_audience),
            created_by: Set(created_by),
            creator_role: Set(creator_role.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("创建日程失败: {e}")))?;

        Ok(result.into_schedule())
    }

    pub async fn get_schedule_by_id_impl(&self, id: i64) -> Result<Option<Schedule>> {
        let result = Schedules::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询日程失败: {e}")))?;

        Ok(result.map(|m| m.into_schedule()))
    }

    /// 分页列出日程，按开始时间升序
    pub async fn list_schedules_with_pagination_impl(
        &self,
        query: ScheduleListQuery,
    ) -> Result<ScheduleListResponse> {
        let mut select = Schedules::find();

        if let Some(labels) = query.visible_audiences {
            let mut visible = Condition::any().add(Column::TargetAudience.is_in(labels));
            if let Some((creator_id, creator_role)) = query.creator {
                visible = visible.add(
                    Condition::all()
                        .add(Column::CreatedBy.eq(creator_id))
                        .add(Column::CreatorRole.eq(creator_role.to_string())),
                );
            }
            select = select.filter(visible);
        }

        if let Some(ref event_type) = query.event_type {
            select = select.filter(Column::EventType.eq(event_type.as_str()));
        }
        if let Some(from) = query.from {
            select = select.filter(Column::StartTime.gte(from));
        }
        if let Some(to) = query.to {
            select = select.filter(Column::StartTime.lte(to));
        }

        select = select.order_by_asc(Column::StartTime);

        let paginator = select.paginate(&self.db, query.size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| LmsError::database_operation(format!("查询日程总数失败: {e}")))?;

        let schedules = paginator
            .fetch_page(query.page - 1)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询日程列表失败: {e}")))?;

        Ok(ScheduleListResponse {
            items: schedules.into_iter().map(|m| m.into_schedule()).collect(),
            pagination: PaginationInfo::new(query.page, query.size, total),
        })
    }

    pub async fn update_schedule_impl(
        &self,
        id: i64,
        update: UpdateScheduleRequest,
    ) -> Result<Option<Schedule>> {
        if self.get_schedule_by_id_impl(id).await?.is_none() {
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
            model.description = Set(Some(description));
        }
        if let Some(event_type) = update.event_type {
            model.event_type = Set(event_type);
        }
        if let Some(start_time) = update.start_time {
            model.start_time = Set(start_time.timestamp());
        }
        if let Some(end_time) = update.end_time {
            model.end_time = Set(Some(end_time.timestamp()));
        }
        if let Some(location) = update.location {
            model.location = Set(Some(location));
        }
        if let Some(target_audience) = update.target_audience {
            model.target_audience = Set(target_audience);
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("更新日程失败: {e}")))?;

        Ok(Some(result.into_schedule()))
    }

    pub async fn delete_schedule_impl(&self, id: i64) -> Result<bool> {
        let result = Schedules::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("删除日程失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

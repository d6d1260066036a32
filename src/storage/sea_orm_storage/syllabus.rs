//! 教学大纲存储操作

use super::SeaOrmStorage;
use crate::entity::syllabus_subtopics::{
    self, ActiveModel as SubtopicActiveModel, Entity as SyllabusSubtopics,
};
use crate::entity::syllabus_topics::{ActiveModel, Column, Entity as SyllabusTopics};
use crate::errors::{LmsError, Result};
use crate::models::syllabus::{
    entities::{SyllabusSubtopic, SyllabusTopic, completion_percentage},
    requests::{CreateTopicRequest, SyllabusQuery, UpdateSubtopicRequest, UpdateTopicRequest},
    responses::SyllabusProgressResponse,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建主题，附带的子主题在同一事务内写入
    pub async fn create_syllabus_topic_impl(
        &self,
        teacher_id: i64,
        req: CreateTopicRequest,
    ) -> Result<SyllabusTopic> {
        let now = chrono::Utc::now().timestamp();

        let positions: Vec<i32> = SyllabusTopics::find()
            .select_only()
            .column(Column::Position)
            .filter(Column::Subject.eq(req.subject.as_str()))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询主题序号失败: {e}")))?;
        let position = positions.iter().max().map(|p| p + 1).unwrap_or(0);

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| LmsError::database_operation(format!("开启事务失败: {e}")))?;

        let topic = ActiveModel {
            teacher_id: Set(teacher_id),
            subject: Set(req.subject),
            semester: Set(req.semester),
            title: Set(req.title),
            description: Set(req.description),
            position: Set(position),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| LmsError::database_operation(format!("创建主题失败: {e}")))?;

        let titles: Vec<String> = req
            .subtopics
            .unwrap_or_default()
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        if !titles.is_empty() {
            let models = titles
                .into_iter()
                .enumerate()
                .map(|(i, title)| SubtopicActiveModel {
                    topic_id: Set(topic.id),
                    title: Set(title),
                    position: Set(i as i32),
                    is_completed: Set(false),
                    completed_at: Set(None),
                    ..Default::default()
                });
            SyllabusSubtopics::insert_many(models)
                .exec(&txn)
                .await
                .map_err(|e| LmsError::database_operation(format!("创建子主题失败: {e}")))?;
        }

        txn.commit()
            .await
            .map_err(|e| LmsError::database_operation(format!("提交事务失败: {e}")))?;

        self.get_syllabus_topic_by_id_impl(topic.id)
            .await?
            .ok_or_else(|| LmsError::database_operation("创建主题后读取失败"))
    }

    pub async fn get_syllabus_topic_by_id_impl(&self, id: i64) -> Result<Option<SyllabusTopic>> {
        let topic = SyllabusTopics::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询主题失败: {e}")))?;

        let Some(topic) = topic else {
            return Ok(None);
        };

        let subtopics = SyllabusSubtopics::find()
            .filter(syllabus_subtopics::Column::TopicId.eq(id))
            .order_by_asc(syllabus_subtopics::Column::Position)
            .order_by_asc(syllabus_subtopics::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询子主题失败: {e}")))?;

        Ok(Some(topic.into_topic(subtopics)))
    }

    /// 列出主题及其子主题
    pub async fn list_syllabus_topics_impl(
        &self,
        query: SyllabusQuery,
    ) -> Result<Vec<SyllabusTopic>> {
        let mut select = SyllabusTopics::find();

        if let Some(ref subject) = query.subject {
            select = select.filter(Column::Subject.eq(subject.as_str()));
        }
        if let Some(semester) = query.semester {
            select = select.filter(Column::Semester.eq(semester));
        }
        if let Some(teacher_id) = query.teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }

        let rows = select
            .order_by_asc(Column::Subject)
            .order_by_asc(Column::Position)
            .order_by_asc(Column::Id)
            .find_with_related(SyllabusSubtopics)
            .all(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询大纲失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|(topic, mut subtopics)| {
                subtopics.sort_by_key(|s| (s.position, s.id));
                topic.into_topic(subtopics)
            })
            .collect())
    }

    pub async fn update_syllabus_topic_impl(
        &self,
        id: i64,
        update: UpdateTopicRequest,
    ) -> Result<Option<SyllabusTopic>> {
        let existing = SyllabusTopics::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询主题失败: {e}")))?;
        if existing.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(subject) = update.subject {
            model.subject = Set(subject);
        }
        if let Some(semester) = update.semester {
            model.semester = Set(Some(semester));
        }
        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(position) = update.position {
            model.position = Set(position);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("更新主题失败: {e}")))?;

        self.get_syllabus_topic_by_id_impl(id).await
    }

    pub async fn delete_syllabus_topic_impl(&self, id: i64) -> Result<bool> {
        let result = SyllabusTopics::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("删除主题失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 追加子主题到末尾
    pub async fn create_syllabus_subtopic_impl(
        &self,
        topic_id: i64,
        title: String,
    ) -> Result<SyllabusSubtopic> {
        let positions: Vec<i32> = SyllabusSubtopics::find()
            .select_only()
            .column(syllabus_subtopics::Column::Position)
            .filter(syllabus_subtopics::Column::TopicId.eq(topic_id))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询子主题序号失败: {e}")))?;

        let model = SubtopicActiveModel {
            topic_id: Set(topic_id),
            title: Set(title),
            position: Set(positions.iter().max().map(|p| p + 1).unwrap_or(0)),
            is_completed: Set(false),
            completed_at: Set(None),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("创建子主题失败: {e}")))?;

        Ok(result.into_subtopic())
    }

    pub async fn get_syllabus_subtopic_by_id_impl(
        &self,
        id: i64,
    ) -> Result<Option<SyllabusSubtopic>> {
        let result = SyllabusSubtopics::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询子主题失败: {e}")))?;

        Ok(result.map(|m| m.into_subtopic()))
    }

    pub async fn update_syllabus_subtopic_impl(
        &self,
        id: i64,
        update: UpdateSubtopicRequest,
    ) -> Result<Option<SyllabusSubtopic>> {
        if self.get_syllabus_subtopic_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = SubtopicActiveModel {
            id: Set(id),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(position) = update.position {
            model.position = Set(position);
        }
        if let Some(is_completed) = update.is_completed {
            model.is_completed = Set(is_completed);
            model.completed_at = Set(is_completed.then(|| chrono::Utc::now().timestamp()));
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("更新子主题失败: {e}")))?;

        Ok(Some(result.into_subtopic()))
    }

    pub async fn delete_syllabus_subtopic_impl(&self, id: i64) -> Result<bool> {
        let result = SyllabusSubtopics::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("删除子主题失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 完成进度统计
    pub async fn get_syllabus_progress_impl(
        &self,
        query: SyllabusQuery,
    ) -> Result<SyllabusProgressResponse> {
        let topics = self.list_syllabus_topics_impl(query).await?;

        let total_subtopics: usize = topics.iter().map(|t| t.subtopics.len()).sum();
        let completed_subtopics: usize = topics
            .iter()
            .flat_map(|t| t.subtopics.iter())
            .filter(|s| s.is_completed)
            .count();

        Ok(SyllabusProgressResponse {
            total_topics: topics.len() as i64,
            total_subtopics: total_subtopics as i64,
            completed_subtopics: completed_subtopics as i64,
            percentage: completion_percentage(completed_subtopics, total_subtopics),
        })
    }
}

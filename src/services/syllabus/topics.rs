use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SyllabusService;
use crate::models::syllabus::requests::{CreateTopicRequest, SyllabusQuery, UpdateTopicRequest};
use crate::models::syllabus::responses::TopicListResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, forbidden, not_found, storage_error, validation_failed};
use crate::utils::validate::{validate_required_text, validate_semester};

pub(super) const MAX_TITLE_CHARS: usize = 255;

fn validate_topic_fields(
    subject: Option<&str>,
    title: Option<&str>,
    semester: Option<i32>,
    description: Option<&str>,
) -> Result<(), String> {
    if let Some(subject) = subject {
        validate_required_text(subject, "科目", 100)?;
    }
    if let Some(title) = title {
        validate_required_text(title, "标题", MAX_TITLE_CHARS)?;
    }
    if let Some(semester) = semester {
        validate_semester(semester)?;
    }
    if description.is_some_and(|d| d.chars().count() > 5_000) {
        return Err("描述长度不能超过 5000 个字符".to_string());
    }
    Ok(())
}

pub async fn list_topics(
    service: &SyllabusService,
    request: &HttpRequest,
    query: SyllabusQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    match storage.list_syllabus_topics(query).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            TopicListResponse { items },
            "获取大纲主题成功",
        ))),
        Err(e) => Ok(storage_error("获取大纲主题失败", e)),
    }
}

pub async fn create_topic(
    service: &SyllabusService,
    request: &HttpRequest,
    topic_data: CreateTopicRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    // teacher_id 外键指向教师表
    if !user.is_teacher() {
        return Ok(forbidden("只有教师可以创建大纲主题"));
    }
    if let Err(msg) = validate_topic_fields(
        Some(&topic_data.subject),
        Some(&topic_data.title),
        topic_data.semester,
        topic_data.description.as_deref(),
    ) {
        return Ok(validation_failed(msg));
    }
    if let Some(titles) = &topic_data.subtopics
        && let Some((idx, _)) = titles
            .iter()
            .enumerate()
            .find(|(_, t)| validate_required_text(t, "子主题标题", MAX_TITLE_CHARS).is_err())
    {
        return Ok(validation_failed(format!(
            "第 {} 个子主题标题不能超过 {MAX_TITLE_CHARS} 个字符",
            idx + 1
        )));
    }

    let storage = service.get_storage(request);
    match storage.create_syllabus_topic(user.id, topic_data).await {
        Ok(topic) => {
            info!(
                "Syllabus topic {} created by teacher {} with {} subtopics",
                topic.id,
                user.id,
                topic.subtopics.len()
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                topic,
                "大纲主题创建成功",
            )))
        }
        Err(e) => Ok(storage_error("创建大纲主题失败", e)),
    }
}

pub async fn update_topic(
    service: &SyllabusService,
    request: &HttpRequest,
    topic_id: i64,
    update_data: UpdateTopicRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let topic = match storage.get_syllabus_topic_by_id(topic_id).await {
        Ok(Some(topic)) => topic,
        Ok(None) => {
            return Ok(not_found(ErrorCode::SyllabusTopicNotFound, "大纲主题不存在"));
        }
        Err(e) => return Ok(storage_error("查询大纲主题失败", e)),
    };
    if !user.owns_or_admin(topic.teacher_id) {
        return Ok(forbidden("只能修改自己的大纲主题"));
    }
    if let Err(msg) = validate_topic_fields(
        update_data.subject.as_deref(),
        update_data.title.as_deref(),
        update_data.semester,
        update_data.description.as_deref(),
    ) {
        return Ok(validation_failed(msg));
    }
    if update_data.position.is_some_and(|p| p < 0) {
        return Ok(validation_failed("序号不能为负数"));
    }

    match storage.update_syllabus_topic(topic_id, update_data).await {
        Ok(Some(updated)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            updated,
            "大纲主题更新成功",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::SyllabusTopicNotFound, "大纲主题不存在")),
        Err(e) => Ok(storage_error("更新大纲主题失败", e)),
    }
}

pub async fn delete_topic(
    service: &SyllabusService,
    request: &HttpRequest,
    topic_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let topic = match storage.get_syllabus_topic_by_id(topic_id).await {
        Ok(Some(topic)) => topic,
        Ok(None) => {
            return Ok(not_found(ErrorCode::SyllabusTopicNotFound, "大纲主题不存在"));
        }
        Err(e) => return Ok(storage_error("查询大纲主题失败", e)),
    };
    if !user.owns_or_admin(topic.teacher_id) {
        return Ok(forbidden("只能删除自己的大纲主题"));
    }

    // 子主题随外键级联删除
    match storage.delete_syllabus_topic(topic_id).await {
        Ok(true) => {
            info!("Syllabus topic {} deleted by {} {}", topic_id, user.role, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "大纲主题删除成功",
            )))
        }
        Ok(false) => Ok(not_found(ErrorCode::SyllabusTopicNotFound, "大纲主题不存在")),
        Err(e) => Ok(storage_error("删除大纲主题失败", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_topic_fields() {
        assert!(validate_topic_fields(Some("Physics"), Some("Optics"), Some(2), None).is_ok());
        assert!(validate_topic_fields(Some(""), Some("Optics"), None, None).is_err());
        assert!(validate_topic_fields(None, None, Some(9), None).is_err());
        assert!(validate_topic_fields(None, None, None, None).is_ok());
    }
}

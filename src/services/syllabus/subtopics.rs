use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SyllabusService;
use super::topics::MAX_TITLE_CHARS;
use crate::models::syllabus::entities::SyllabusSubtopic;
use crate::models::syllabus::requests::{CreateSubtopicRequest, UpdateSubtopicRequest};
use crate::models::users::entities::AuthUser;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, forbidden, not_found, storage_error, validation_failed};
use crate::storage::Storage;
use crate::utils::validate::validate_required_text;

/// 读取子主题并校验其所属主题的写权限
async fn load_writable_subtopic(
    storage: &dyn Storage,
    user: &AuthUser,
    subtopic_id: i64,
) -> Result<SyllabusSubtopic, HttpResponse> {
    let subtopic = match storage.get_syllabus_subtopic_by_id(subtopic_id).await {
        Ok(Some(subtopic)) => subtopic,
        Ok(None) => {
            return Err(not_found(
                ErrorCode::SyllabusSubtopicNotFound,
                "子主题不存在",
            ));
        }
        Err(e) => return Err(storage_error("查询子主题失败", e)),
    };
    match storage.get_syllabus_topic_by_id(subtopic.topic_id).await {
        Ok(Some(topic)) if user.owns_or_admin(topic.teacher_id) => Ok(subtopic),
        Ok(Some(_)) => Err(forbidden("只能修改自己的大纲主题")),
        Ok(None) => Err(not_found(
            ErrorCode::SyllabusTopicNotFound,
            "大纲主题不存在",
        )),
        Err(e) => Err(storage_error("查询大纲主题失败", e)),
    }
}

pub async fn create_subtopic(
    service: &SyllabusService,
    request: &HttpRequest,
    topic_id: i64,
    subtopic_data: CreateSubtopicRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    if let Err(msg) = validate_required_text(&subtopic_data.title, "标题", MAX_TITLE_CHARS) {
        return Ok(validation_failed(msg));
    }
    let storage = service.get_storage(request);

    match storage.get_syllabus_topic_by_id(topic_id).await {
        Ok(Some(topic)) if user.owns_or_admin(topic.teacher_id) => {}
        Ok(Some(_)) => return Ok(forbidden("只能修改自己的大纲主题")),
        Ok(None) => {
            return Ok(not_found(ErrorCode::SyllabusTopicNotFound, "大纲主题不存在"));
        }
        Err(e) => return Ok(storage_error("查询大纲主题失败", e)),
    }

    match storage
        .create_syllabus_subtopic(topic_id, subtopic_data.title.trim().to_string())
        .await
    {
        Ok(subtopic) => Ok(HttpResponse::Created().json(ApiResponse::success(
            subtopic,
            "子主题创建成功",
        ))),
        Err(e) => Ok(storage_error("创建子主题失败", e)),
    }
}

pub async fn update_subtopic(
    service: &SyllabusService,
    request: &HttpRequest,
    subtopic_id: i64,
    update_data: UpdateSubtopicRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    if let Some(title) = &update_data.title
        && let Err(msg) = validate_required_text(title, "标题", MAX_TITLE_CHARS)
    {
        return Ok(validation_failed(msg));
    }
    if update_data.position.is_some_and(|p| p < 0) {
        return Ok(validation_failed("序号不能为负数"));
    }
    let storage = service.get_storage(request);

    if let Err(resp) = load_writable_subtopic(storage.as_ref(), &user, subtopic_id).await {
        return Ok(resp);
    }

    match storage.update_syllabus_subtopic(subtopic_id, update_data).await {
        Ok(Some(updated)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            updated,
            "子主题更新成功",
        ))),
        Ok(None) => Ok(not_found(
            ErrorCode::SyllabusSubtopicNotFound,
            "子主题不存在",
        )),
        Err(e) => Ok(storage_error("更新子主题失败", e)),
    }
}

pub async fn toggle_subtopic(
    service: &SyllabusService,
    request: &HttpRequest,
    subtopic_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let subtopic = match load_writable_subtopic(storage.as_ref(), &user, subtopic_id).await {
        Ok(subtopic) => subtopic,
        Err(resp) => return Ok(resp),
    };
    let update = UpdateSubtopicRequest {
        is_completed: Some(!subtopic.is_completed),
        ..Default::default()
    };

    match storage.update_syllabus_subtopic(subtopic_id, update).await {
        Ok(Some(updated)) => {
            info!(
                "Subtopic {} marked {} by {} {}",
                subtopic_id,
                if updated.is_completed { "completed" } else { "pending" },
                user.role,
                user.id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                updated,
                "子主题状态更新成功",
            )))
        }
        Ok(None) => Ok(not_found(
            ErrorCode::SyllabusSubtopicNotFound,
            "子主题不存在",
        )),
        Err(e) => Ok(storage_error("切换子主题状态失败", e)),
    }
}

pub async fn delete_subtopic(
    service: &SyllabusService,
    request: &HttpRequest,
    subtopic_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Err(resp) = load_writable_subtopic(storage.as_ref(), &user, subtopic_id).await {
        return Ok(resp);
    }

    match storage.delete_syllabus_subtopic(subtopic_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "子主题删除成功",
        ))),
        Ok(false) => Ok(not_found(
            ErrorCode::SyllabusSubtopicNotFound,
            "子主题不存在",
        )),
        Err(e) => Ok(storage_error("删除子主题失败", e)),
    }
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{StartupIdeaService, visible_to};
use crate::models::startup_ideas::entities::IdeaStatus;
use crate::models::startup_ideas::requests::{
    CreateStartupIdeaRequest, StartupIdeaListParams, StartupIdeaListQuery,
    UpdateStartupIdeaRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, forbidden, not_found, storage_error, validation_failed};
use crate::utils::validate::validate_required_text;

const MAX_DESCRIPTION_CHARS: usize = 10_000;

fn validate_idea(
    title: Option<&str>,
    description: Option<&str>,
    category: Option<&str>,
) -> Result<(), String> {
    if let Some(title) = title {
        validate_required_text(title, "标题", 255)?;
    }
    if let Some(description) = description {
        validate_required_text(description, "描述", MAX_DESCRIPTION_CHARS)?;
    }
    if category.is_some_and(|c| c.chars().count() > 100) {
        return Err("分类长度不能超过 100 个字符".to_string());
    }
    Ok(())
}

pub async fn list_ideas(
    service: &StartupIdeaService,
    request: &HttpRequest,
    query: StartupIdeaListParams,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    let mut list_query = StartupIdeaListQuery::from(query);
    if user.is_student() {
        list_query.student_id = Some(user.id);
    }

    let storage = service.get_storage(request);
    match storage.list_startup_ideas_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "获取创业想法列表成功",
        ))),
        Err(e) => Ok(storage_error("获取创业想法列表失败", e)),
    }
}

pub async fn create_idea(
    service: &StartupIdeaService,
    request: &HttpRequest,
    mut idea_data: CreateStartupIdeaRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    if !user.is_student() {
        return Ok(forbidden("只有学生可以提交创业想法"));
    }
    if let Err(msg) = validate_idea(
        Some(&idea_data.title),
        Some(&idea_data.description),
        idea_data.category.as_deref(),
    ) {
        return Ok(validation_failed(msg));
    }
    idea_data.title = idea_data.title.trim().to_string();

    let storage = service.get_storage(request);
    match storage.create_startup_idea(user.id, idea_data).await {
        Ok(idea) => {
            info!("Startup idea {} submitted by student {}", idea.id, user.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                idea,
                "创业想法提交成功",
            )))
        }
        Err(e) => Ok(storage_error("提交创业想法失败", e)),
    }
}

pub async fn get_idea(
    service: &StartupIdeaService,
    request: &HttpRequest,
    idea_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage.get_startup_idea_by_id(idea_id).await {
        Ok(Some(idea)) if visible_to(&idea, &user) => Ok(HttpResponse::Ok().json(
            ApiResponse::success(idea, "获取创业想法成功"),
        )),
        Ok(_) => Ok(not_found(ErrorCode::StartupIdeaNotFound, "创业想法不存在")),
        Err(e) => Ok(storage_error("查询创业想法失败", e)),
    }
}

pub async fn update_idea(
    service: &StartupIdeaService,
    request: &HttpRequest,
    idea_id: i64,
    update_data: UpdateStartupIdeaRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let idea = match storage.get_startup_idea_by_id(idea_id).await {
        Ok(Some(idea)) if visible_to(&idea, &user) => idea,
        Ok(_) => return Ok(not_found(ErrorCode::StartupIdeaNotFound, "创业想法不存在")),
        Err(e) => return Ok(storage_error("查询创业想法失败", e)),
    };
    if !user.is_student() || idea.student_id != user.id {
        return Ok(forbidden("只有提交者本人可以修改创业想法"));
    }
    // 进入审核后不可再修改
    if idea.status != IdeaStatus::Pending {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::Conflict,
            "只有待审核的创业想法可以修改",
        )));
    }
    if let Err(msg) = validate_idea(
        update_data.title.as_deref(),
        update_data.description.as_deref(),
        update_data.category.as_deref(),
    ) {
        return Ok(validation_failed(msg));
    }

    match storage.update_startup_idea(idea_id, update_data).await {
        Ok(Some(updated)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            updated,
            "创业想法更新成功",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::StartupIdeaNotFound, "创业想法不存在")),
        Err(e) => Ok(storage_error("更新创业想法失败", e)),
    }
}

pub async fn delete_idea(
    service: &StartupIdeaService,
    request: &HttpRequest,
    idea_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let idea = match storage.get_startup_idea_by_id(idea_id).await {
        Ok(Some(idea)) if visible_to(&idea, &user) => idea,
        Ok(_) => return Ok(not_found(ErrorCode::StartupIdeaNotFound, "创业想法不存在")),
        Err(e) => return Ok(storage_error("查询创业想法失败", e)),
    };
    // 学生可撤回待审核的想法，管理员可删除任意想法
    let own_pending =
        user.is_student() && idea.student_id == user.id && idea.status == IdeaStatus::Pending;
    if !user.is_admin() && !own_pending {
        return Ok(forbidden("无权删除该创业想法"));
    }

    match storage.delete_startup_idea(idea_id).await {
        Ok(true) => {
            info!("Startup idea {} deleted by {} {}", idea_id, user.role, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "创业想法删除成功",
            )))
        }
        Ok(false) => Ok(not_found(ErrorCode::StartupIdeaNotFound, "创业想法不存在")),
        Err(e) => Ok(storage_error("删除创业想法失败", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_idea() {
        assert!(validate_idea(Some("Campus marketplace"), Some("Buy and sell books"), None).is_ok());
        assert!(validate_idea(Some(" "), None, None).is_err());
        assert!(validate_idea(None, None, Some(&"c".repeat(101))).is_err());
        // 部分更新时缺省字段不校验
        assert!(validate_idea(None, None, None).is_ok());
    }
}

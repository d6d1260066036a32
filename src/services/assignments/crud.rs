use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::{AssignmentService, visible_to};
use crate::models::assignments::requests::{
    AssignmentListParams, AssignmentListQuery, CreateAssignmentRequest, UpdateAssignmentRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::uploads::remove_stored_file;
use crate::services::{current_user, forbidden, not_found, storage_error, validation_failed};
use crate::utils::validate::{validate_required_text, validate_semester};

fn assignment_not_found() -> HttpResponse {
    not_found(ErrorCode::AssignmentNotFound, "作业不存在")
}

fn validate_fields(
    title: Option<&str>,
    subject: Option<&str>,
    semester: Option<i32>,
    max_marks: Option<i32>,
) -> Result<(), String> {
    if let Some(title) = title {
        validate_required_text(title, "标题", 255)?;
    }
    if let Some(subject) = subject {
        validate_required_text(subject, "科目", 100)?;
    }
    if let Some(semester) = semester {
        validate_semester(semester)?;
    }
    if max_marks.is_some_and(|marks| marks <= 0) {
        return Err("满分必须为正数".to_string());
    }
    Ok(())
}

pub async fn list_assignments(
    service: &AssignmentService,
    request: &HttpRequest,
    query: AssignmentListParams,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let mut list_query = AssignmentListQuery::from(query);
    if user.is_student() {
        list_query.visible_semester = user.semester;
    }

    match storage.list_assignments_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "获取作业列表成功",
        ))),
        Err(e) => Ok(storage_error("获取作业列表失败", e)),
    }
}

pub async fn create_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_data: CreateAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    if !user.is_teacher() {
        return Ok(forbidden("只有教师可以创建作业"));
    }
    if let Err(msg) = validate_fields(
        Some(&assignment_data.title),
        Some(&assignment_data.subject),
        assignment_data.semester,
        assignment_data.max_marks,
    ) {
        return Ok(validation_failed(msg));
    }

    let storage = service.get_storage(request);
    match storage.create_assignment(user.id, assignment_data).await {
        Ok(assignment) => {
            info!("Assignment {} created by teacher {}", assignment.id, user.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                assignment,
                "作业创建成功",
            )))
        }
        Err(e) => Ok(storage_error("创建作业失败", e)),
    }
}

pub async fn get_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage.get_assignment_by_id(assignment_id).await {
        Ok(Some(assignment)) if visible_to(&assignment, &user) => Ok(HttpResponse::Ok().json(
            ApiResponse::success(assignment, "获取作业成功"),
        )),
        Ok(_) => Ok(assignment_not_found()),
        Err(e) => Ok(storage_error("查询作业失败", e)),
    }
}

pub async fn update_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
    update_data: UpdateAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage.get_assignment_by_id(assignment_id).await {
        Ok(Some(assignment)) if !user.owns_or_admin(assignment.teacher_id) => {
            return Ok(forbidden("只能修改自己的作业"));
        }
        Ok(Some(_)) => {}
        Ok(None) => return Ok(assignment_not_found()),
        Err(e) => return Ok(storage_error("查询作业失败", e)),
    }

    if let Err(msg) = validate_fields(
        update_data.title.as_deref(),
        update_data.subject.as_deref(),
        update_data.semester,
        update_data.max_marks,
    ) {
        return Ok(validation_failed(msg));
    }

    match storage.update_assignment(assignment_id, update_data).await {
        Ok(Some(assignment)) => {
            info!("Assignment {} updated by {} {}", assignment_id, user.role, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                assignment,
                "作业更新成功",
            )))
        }
        Ok(None) => Ok(assignment_not_found()),
        Err(e) => Ok(storage_error("更新作业失败", e)),
    }
}

pub async fn delete_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let assignment = match storage.get_assignment_by_id(assignment_id).await {
        Ok(Some(assignment)) => assignment,
        Ok(None) => return Ok(assignment_not_found()),
        Err(e) => return Ok(storage_error("查询作业失败", e)),
    };
    if !user.owns_or_admin(assignment.teacher_id) {
        return Ok(forbidden("只能删除自己的作业"));
    }

    // 提交记录随外键级联删除，先收集需要清理的文件
    let mut files: Vec<String> = match storage.list_submissions_by_assignment(assignment_id).await
    {
        Ok(submissions) => submissions.into_iter().filter_map(|s| s.file_path).collect(),
        Err(e) => {
            warn!("Failed to collect submission files of assignment {}: {}", assignment_id, e);
            Vec::new()
        }
    };
    files.extend(assignment.attachment_path);

    match storage.delete_assignment(assignment_id).await {
        Ok(true) => {
            for path in &files {
                remove_stored_file(path);
            }
            info!(
                "Assignment {} deleted by {} {}, removed {} files",
                assignment_id,
                user.role,
                user.id,
                files.len()
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "作业删除成功",
            )))
        }
        Ok(false) => Ok(assignment_not_found()),
        Err(e) => Ok(storage_error("删除作业失败", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_fields() {
        assert!(validate_fields(Some("Essay"), Some("English"), Some(2), Some(50)).is_ok());
        assert!(validate_fields(None, None, None, None).is_ok());
        assert!(validate_fields(Some(""), None, None, None).is_err());
        assert!(validate_fields(None, None, None, Some(0)).is_err());
        assert!(validate_fields(None, None, Some(9), None).is_err());
    }
}

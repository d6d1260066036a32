use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{AssignmentService, visible_to};
use crate::models::assignments::entities::SubmissionStatus;
use crate::models::assignments::requests::NewSubmission;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::uploads::{receive_upload, remove_stored_file};
use crate::services::{current_user, forbidden, not_found, storage_error, validation_failed};

const MAX_CONTENT_CHARS: usize = 20_000;

pub async fn submit_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    if !user.is_student() {
        return Ok(forbidden("只有学生可以提交作业"));
    }
    let storage = service.get_storage(request);

    let assignment = match storage.get_assignment_by_id(assignment_id).await {
        Ok(Some(assignment)) if visible_to(&assignment, &user) => assignment,
        Ok(_) => return Ok(not_found(ErrorCode::AssignmentNotFound, "作业不存在")),
        Err(e) => return Ok(storage_error("查询作业失败", e)),
    };

    // 已批改的提交不可覆盖
    let previous = match storage
        .get_submission_by_assignment_and_student(assignment_id, user.id)
        .await
    {
        Ok(Some(previous)) if previous.status == SubmissionStatus::Graded => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::SubmissionAlreadyGraded,
                "提交已评分，不能再修改",
            )));
        }
        Ok(previous) => previous,
        Err(e) => return Ok(storage_error("查询提交失败", e)),
    };

    let form = match receive_upload(payload).await {
        Ok(form) => form,
        Err(resp) => return Ok(resp),
    };
    let content = form.text("content");
    if content.is_none() && form.file.is_none() {
        return Ok(validation_failed(
            "提交需要包含文本内容或文件",
        ));
    }
    if content
        .as_deref()
        .is_some_and(|c| c.chars().count() > MAX_CONTENT_CHARS)
    {
        form.discard();
        return Ok(validation_failed(format!(
            "提交内容不能超过 {MAX_CONTENT_CHARS} 个字符"
        )));
    }

    let is_late = assignment.is_past_due(chrono::Utc::now());
    let submission = NewSubmission {
        assignment_id,
        student_id: user.id,
        content,
        file_name: form.file.as_ref().map(|f| f.original_name.clone()),
        file_path: form.file.as_ref().map(|f| f.stored_path.clone()),
        is_late,
    };

    match storage.upsert_submission(submission).await {
        Ok(saved) => {
            // 新文件替换了旧文件
            if form.file.is_some()
                && let Some(old_path) = previous.and_then(|p| p.file_path)
            {
                remove_stored_file(&old_path);
            }
            info!(
                "Student {} submitted assignment {}{}",
                user.id,
                assignment_id,
                if is_late { " (late)" } else { "" }
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                saved,
                "作业提交成功",
            )))
        }
        Err(e) => {
            form.discard();
            Ok(storage_error("保存提交失败", e))
        }
    }
}

pub async fn get_my_submission(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage
        .get_submission_by_assignment_and_student(assignment_id, user.id)
        .await
    {
        Ok(Some(submission)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            submission,
            "获取提交成功",
        ))),
        Ok(None) => Ok(not_found(
            ErrorCode::SubmissionNotFound,
            "提交不存在",
        )),
        Err(e) => Ok(storage_error("查询提交失败", e)),
    }
}

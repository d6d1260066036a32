use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AssignmentService;
use crate::models::assignments::requests::GradeSubmissionRequest;
use crate::models::assignments::responses::SubmissionListResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::uploads::file_download;
use crate::services::{current_user, forbidden, not_found, storage_error, validation_failed};

const MAX_FEEDBACK_CHARS: usize = 5_000;

/// 分数需在 0..=max_marks 内
fn validate_grade(marks: i32, max_marks: i32, feedback: Option<&str>) -> Result<(), String> {
    if !(0..=max_marks).contains(&marks) {
        return Err(format!("分数必须在 0 到 {max_marks} 之间"));
    }
    if feedback.is_some_and(|f| f.chars().count() > MAX_FEEDBACK_CHARS) {
        return Err(format!(
            "评语不能超过 {MAX_FEEDBACK_CHARS} 个字符"
        ));
    }
    Ok(())
}

pub async fn list_submissions(
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
        Ok(None) => return Ok(not_found(ErrorCode::AssignmentNotFound, "作业不存在")),
        Err(e) => return Ok(storage_error("查询作业失败", e)),
    };
    if !user.owns_or_admin(assignment.teacher_id) {
        return Ok(forbidden("只能查看自己作业的提交"));
    }

    match storage.list_submissions_by_assignment(assignment_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            SubmissionListResponse { items },
            "获取提交列表成功",
        ))),
        Err(e) => Ok(storage_error("获取提交列表失败", e)),
    }
}

pub async fn grade_submission(
    service: &AssignmentService,
    request: &HttpRequest,
    submission_id: i64,
    grade_data: GradeSubmissionRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let submission = match storage.get_submission_by_id(submission_id).await {
        Ok(Some(submission)) => submission,
        Ok(None) => return Ok(not_found(ErrorCode::SubmissionNotFound, "提交不存在")),
        Err(e) => return Ok(storage_error("查询提交失败", e)),
    };
    let assignment = match storage.get_assignment_by_id(submission.assignment_id).await {
        Ok(Some(assignment)) => assignment,
        Ok(None) => return Ok(not_found(ErrorCode::AssignmentNotFound, "作业不存在")),
        Err(e) => return Ok(storage_error("查询作业失败", e)),
    };
    if !user.owns_or_admin(assignment.teacher_id) {
        return Ok(forbidden("只能为自己作业的提交评分"));
    }

    let feedback = grade_data
        .feedback
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty());
    if let Err(msg) = validate_grade(grade_data.marks, assignment.max_marks, feedback.as_deref()) {
        return Ok(validation_failed(msg));
    }

    match storage
        .grade_submission(submission_id, grade_data.marks, feedback)
        .await
    {
        Ok(Some(graded)) => {
            info!(
                "Submission {} graded {}/{} by {} {}",
                submission_id, grade_data.marks, assignment.max_marks, user.role, user.id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                graded,
                "评分成功",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::SubmissionNotFound, "提交不存在")),
        Err(e) => Ok(storage_error("评分失败", e)),
    }
}

pub async fn download_submission(
    service: &AssignmentService,
    request: &HttpRequest,
    submission_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let submission = match storage.get_submission_by_id(submission_id).await {
        Ok(Some(submission)) => submission,
        Ok(None) => return Ok(not_found(ErrorCode::SubmissionNotFound, "提交不存在")),
        Err(e) => return Ok(storage_error("查询提交失败", e)),
    };

    let allowed = if user.is_student() {
        submission.student_id == user.id
    } else {
        match storage.get_assignment_by_id(submission.assignment_id).await {
            Ok(Some(assignment)) => user.owns_or_admin(assignment.teacher_id),
            Ok(None) => false,
            Err(e) => return Ok(storage_error("查询作业失败", e)),
        }
    };
    // 无权访问时与不存在同样处理，避免泄露提交记录
    if !allowed {
        return Ok(not_found(ErrorCode::SubmissionNotFound, "提交不存在"));
    }

    match (&submission.file_path, &submission.file_name) {
        (Some(path), Some(name)) => Ok(file_download(path, name)),
        _ => Ok(not_found(ErrorCode::FileNotFound, "该提交没有文件")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_bounds() {
        assert!(validate_grade(0, 100, None).is_ok());
        assert!(validate_grade(100, 100, Some("Well done")).is_ok());
        assert!(validate_grade(101, 100, None).is_err());
        assert!(validate_grade(-1, 100, None).is_err());
    }

    #[test]
    fn test_feedback_length() {
        let long = "x".repeat(MAX_FEEDBACK_CHARS + 1);
        assert!(validate_grade(10, 100, Some(&long)).is_err());
    }
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AnnouncementService;
use crate::models::ApiResponse;
use crate::models::announcements::requests::CreateAnnouncementRequest;
use crate::models::schedules::audience::Audience;
use crate::services::notifications::{NotificationKind, fan_out};
use crate::services::{current_user, storage_error, validation_failed};
use crate::utils::validate::validate_required_text;

const PREVIEW_CHARS: usize = 200;

pub async fn create_announcement(
    service: &AnnouncementService,
    request: &HttpRequest,
    mut announcement_data: CreateAnnouncementRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    if let Err(msg) = validate_required_text(&announcement_data.title, "标题", 255)
        .and_then(|_| validate_required_text(&announcement_data.content, "内容", 20_000))
    {
        return Ok(validation_failed(msg));
    }
    announcement_data.target_audience =
        Audience::parse(&announcement_data.target_audience).to_string();

    let storage = service.get_storage(request);
    let announcement = match storage
        .create_announcement(user.id, user.role, announcement_data)
        .await
    {
        Ok(announcement) => announcement,
        Err(e) => return Ok(storage_error("创建公告失败", e)),
    };
    info!(
        "Announcement {} published by {} {} for '{}'",
        announcement.id, user.role, user.id, announcement.target_audience
    );

    fan_out(
        &storage,
        NotificationKind::Announcement,
        &announcement.target_audience,
        &format!("新公告: {}", announcement.title),
        &preview(&announcement.content),
    )
    .await;

    Ok(HttpResponse::Created().json(ApiResponse::success(
        announcement,
        "公告创建成功",
    )))
}

/// 通知正文只取公告开头一段
fn preview(content: &str) -> String {
    let content = content.trim();
    if content.chars().count() <= PREVIEW_CHARS {
        return content.to_string();
    }
    let mut cut: String = content.chars().take(PREVIEW_CHARS).collect();
    cut.push_str("...");
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        assert_eq!(preview("  short  "), "short");

        let long = "课".repeat(PREVIEW_CHARS + 5);
        let cut = preview(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), PREVIEW_CHARS + 3);
    }
}

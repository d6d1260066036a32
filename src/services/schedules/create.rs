use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ScheduleService;
use crate::models::ApiResponse;
use crate::models::schedules::audience::Audience;
use crate::models::schedules::entities::Schedule;
use crate::models::schedules::requests::CreateScheduleRequest;
use crate::services::notifications::{NotificationKind, fan_out};
use crate::services::{current_user, storage_error, validation_failed};
use crate::utils::validate::validate_required_text;

pub async fn create_schedule(
    service: &ScheduleService,
    request: &HttpRequest,
    mut schedule_data: CreateScheduleRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    if let Err(msg) = validate_required_text(&schedule_data.title, "标题", 255)
        .and_then(|_| validate_required_text(&schedule_data.event_type, "事件类型", 50))
    {
        return Ok(validation_failed(msg));
    }
    if let Some(end_time) = schedule_data.end_time
        && end_time < schedule_data.start_time
    {
        return Ok(validation_failed("结束时间不能早于开始时间"));
    }
    schedule_data.target_audience = Audience::parse(&schedule_data.target_audience).to_string();

    let storage = service.get_storage(request);
    let schedule = match storage.create_schedule(user.id, user.role, schedule_data).await {
        Ok(schedule) => schedule,
        Err(e) => return Ok(storage_error("创建日程失败", e)),
    };
    info!(
        "Schedule {} created by {} {} for '{}'",
        schedule.id, user.role, user.id, schedule.target_audience
    );

    // 日程已提交，扇出失败只记录日志
    fan_out(
        &storage,
        NotificationKind::Schedule,
        &schedule.target_audience,
        &format!("新日程: {}", schedule.title),
        &schedule_message(&schedule),
    )
    .await;

    Ok(HttpResponse::Created().json(ApiResponse::success(
        schedule,
        "日程创建成功",
    )))
}

fn schedule_message(schedule: &Schedule) -> String {
    let mut message = format!(
        "{}，时间：{}",
        schedule.event_type,
        schedule.start_time.format("%Y-%m-%d %H:%M UTC")
    );
    if let Some(location) = schedule.location.as_deref().filter(|l| !l.trim().is_empty()) {
        message.push_str(&format!("，地点：{location}"));
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;
    use chrono::TimeZone;

    #[test]
    fn test_schedule_message() {
        let start = chrono::Utc.with_ymd_and_hms(2025, 3, 10, 9, 30, 0).unwrap();
        let mut schedule = Schedule {
            id: 1,
            title: "Midterm".to_string(),
            description: None,
            event_type: "exam".to_string(),
            start_time: start,
            end_time: None,
            location: Some("Hall A".to_string()),
            target_audience: "Everyone".to_string(),
            created_by: 1,
            creator_role: UserRole::Teacher,
            created_at: start,
            updated_at: start,
        };
        assert_eq!(
            schedule_message(&schedule),
            "exam，时间：2025-03-10 09:30 UTC，地点：Hall A"
        );

        schedule.location = None;
        assert_eq!(
            schedule_message(&schedule),
            "exam，时间：2025-03-10 09:30 UTC"
        );
    }
}

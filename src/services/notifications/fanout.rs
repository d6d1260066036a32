//! 通知扇出
//!
//! 日程与公告创建后，按目标受众解析接收者并分块批量写入通知。
//! 扇出是尽力而为的副作用：源记录已经提交，这里的失败只记录日志，不影响调用方。

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::errors::Result;
use crate::models::notifications::entities::NewNotification;
use crate::models::schedules::audience::{Audience, StudentScope};
use crate::models::users::entities::UserRole;
use crate::storage::Storage;

/// 通知类别，决定 `notification_type` 与前端跳转页面
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Schedule,
    Announcement,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Schedule => "schedule",
            NotificationKind::Announcement => "announcement",
        }
    }

    /// 接收者所属角色仪表盘下的页面链接
    pub fn link_for(&self, role: UserRole) -> String {
        let page = match self {
            NotificationKind::Schedule => "schedule",
            NotificationKind::Announcement => "announcements",
        };
        format!("{}/{}", role.dashboard_prefix(), page)
    }
}

/// 解析受众对应的在职教师与在读学生
pub async fn resolve_recipients(
    storage: &Arc<dyn Storage>,
    audience: &Audience,
) -> Result<Vec<(i64, UserRole)>> {
    let mut recipients = Vec::new();

    if audience.includes_teachers() {
        let teacher_ids = storage.list_active_teacher_ids().await?;
        recipients.extend(teacher_ids.into_iter().map(|id| (id, UserRole::Teacher)));
    }

    let semester = match audience.student_scope() {
        Some(StudentScope::All) => Some(None),
        Some(StudentScope::Semester(n)) => Some(Some(n)),
        None => None,
    };
    if let Some(semester) = semester {
        let student_ids = storage.list_active_student_ids(semester).await?;
        recipients.extend(student_ids.into_iter().map(|id| (id, UserRole::Student)));
    }

    Ok(recipients)
}

pub fn build_notifications(
    recipients: &[(i64, UserRole)],
    kind: NotificationKind,
    title: &str,
    message: &str,
) -> Vec<NewNotification> {
    recipients
        .iter()
        .map(|&(recipient_id, recipient_role)| NewNotification {
            recipient_id,
            recipient_role,
            notification_type: kind.as_str().to_string(),
            title: title.to_string(),
            message: message.to_string(),
            link: Some(kind.link_for(recipient_role)),
        })
        .collect()
}

/// 向受众扇出通知，返回写入条数；任何失败都只记录日志并返回 0
pub async fn fan_out(
    storage: &Arc<dyn Storage>,
    kind: NotificationKind,
    target_audience: &str,
    title: &str,
    message: &str,
) -> u64 {
    let audience = Audience::parse(target_audience);
    if !audience.is_recognized() {
        warn!(
            "Unrecognized {} audience '{}', no notifications sent",
            kind.as_str(),
            target_audience
        );
        return 0;
    }

    let recipients = match resolve_recipients(storage, &audience).await {
        Ok(recipients) => recipients,
        Err(e) => {
            error!(
                "Failed to resolve {} notification recipients for '{}': {}",
                kind.as_str(),
                audience,
                e
            );
            return 0;
        }
    };
    if recipients.is_empty() {
        return 0;
    }

    let notifications = build_notifications(&recipients, kind, title, message);
    match storage.create_notifications_batch(notifications).await {
        Ok(count) => {
            info!(
                "Sent {} {} notifications to '{}'",
                count,
                kind.as_str(),
                audience
            );
            count
        }
        Err(e) => {
            error!("Failed to insert {} notifications: {}", kind.as_str(), e);
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::students::requests::CreateStudentRequest;
    use crate::models::teachers::requests::CreateTeacherRequest;
    use crate::storage::sea_orm_storage::SeaOrmStorage;

    struct Seeded {
        storage: Arc<dyn Storage>,
        teachers: Vec<i64>,
        // (id, semester)
        students: Vec<(i64, i32)>,
    }

    async fn seeded() -> Seeded {
        let storage: Arc<dyn Storage> = Arc::new(SeaOrmStorage::in_memory().await);

        let mut teachers = Vec::new();
        for i in 0..2 {
            let teacher = storage
                .create_teacher(CreateTeacherRequest {
                    name: format!("Teacher {i}"),
                    email: format!("teacher{i}@example.com"),
                    password: "hash".to_string(),
                    department: None,
                    designation: None,
                    phone: None,
                })
                .await
                .unwrap();
            teachers.push(teacher.id);
        }

        let mut students = Vec::new();
        for (i, semester) in [3, 3, 4, 1].into_iter().enumerate() {
            let student = storage
                .create_student(CreateStudentRequest {
                    name: format!("Student {i}"),
                    email: format!("student{i}@example.com"),
                    password: "hash".to_string(),
                    semester,
                    roll_number: None,
                    department: None,
                    phone: None,
                })
                .await
                .unwrap();
            students.push((student.id, semester));
        }

        Seeded {
            storage,
            teachers,
            students,
        }
    }

    async fn unread(storage: &Arc<dyn Storage>, id: i64, role: UserRole) -> i64 {
        storage.get_unread_notification_count(id, role).await.unwrap()
    }

    #[test]
    fn test_links_follow_recipient_role() {
        assert_eq!(
            NotificationKind::Schedule.link_for(UserRole::Teacher),
            "/teacher/schedule"
        );
        assert_eq!(
            NotificationKind::Schedule.link_for(UserRole::Student),
            "/student/schedule"
        );
        assert_eq!(
            NotificationKind::Announcement.link_for(UserRole::Student),
            "/student/announcements"
        );
    }

    #[test]
    fn test_build_one_notification_per_recipient() {
        let rows = build_notifications(
            &[(1, UserRole::Teacher), (7, UserRole::Student)],
            NotificationKind::Schedule,
            "新日程: 考试",
            "Midterm exam",
        );
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].notification_type, "schedule");
        assert_eq!(rows[1].recipient_id, 7);
        assert_eq!(rows[1].link.as_deref(), Some("/student/schedule"));
    }

    #[tokio::test]
    async fn test_semester_audience_reaches_only_that_semester() {
        let seeded = seeded().await;
        let sent = fan_out(
            &seeded.storage,
            NotificationKind::Schedule,
            "Students (Sem 3)",
            "Lab",
            "Lab session",
        )
        .await;
        assert_eq!(sent, 2);

        for &(id, semester) in &seeded.students {
            let expected = i64::from(semester == 3);
            assert_eq!(unread(&seeded.storage, id, UserRole::Student).await, expected);
        }
        for &id in &seeded.teachers {
            assert_eq!(unread(&seeded.storage, id, UserRole::Teacher).await, 0);
        }
    }

    #[tokio::test]
    async fn test_everyone_reaches_each_account_once() {
        let seeded = seeded().await;
        let sent = fan_out(
            &seeded.storage,
            NotificationKind::Schedule,
            "Everyone",
            "Holiday",
            "Campus closed",
        )
        .await;
        assert_eq!(sent as usize, seeded.teachers.len() + seeded.students.len());

        for &id in &seeded.teachers {
            assert_eq!(unread(&seeded.storage, id, UserRole::Teacher).await, 1);
        }
        for &(id, _) in &seeded.students {
            assert_eq!(unread(&seeded.storage, id, UserRole::Student).await, 1);
        }
    }

    #[tokio::test]
    async fn test_everyone_in_large_school_reaches_all_students() {
        let storage: Arc<dyn Storage> = Arc::new(SeaOrmStorage::in_memory().await);
        let mut last_id = 0;
        for i in 0..4200 {
            last_id = storage
                .create_student(CreateStudentRequest {
                    name: format!("Student {i}"),
                    email: format!("bulk{i}@example.com"),
                    password: "hash".to_string(),
                    semester: 1,
                    roll_number: None,
                    department: None,
                    phone: None,
                })
                .await
                .unwrap()
                .id;
        }

        let sent = fan_out(
            &storage,
            NotificationKind::Schedule,
            "Everyone",
            "Orientation",
            "Main hall",
        )
        .await;
        assert_eq!(sent, 4200);
        assert_eq!(unread(&storage, last_id, UserRole::Student).await, 1);
    }

    #[tokio::test]
    async fn test_teachers_audience_skips_students() {
        let seeded = seeded().await;
        let sent = fan_out(
            &seeded.storage,
            NotificationKind::Announcement,
            "Teachers",
            "Staff meeting",
            "Friday 3pm",
        )
        .await;
        assert_eq!(sent as usize, seeded.teachers.len());
        for &(id, _) in &seeded.students {
            assert_eq!(unread(&seeded.storage, id, UserRole::Student).await, 0);
        }
    }

    #[tokio::test]
    async fn test_unparsable_semester_sends_nothing() {
        let seeded = seeded().await;
        for audience in ["Students (Sem X)", "Parents", ""] {
            let sent = fan_out(
                &seeded.storage,
                NotificationKind::Schedule,
                audience,
                "标题",
                "内容",
            )
            .await;
            assert_eq!(sent, 0, "audience {audience:?}");
        }
        for &(id, _) in &seeded.students {
            assert_eq!(unread(&seeded.storage, id, UserRole::Student).await, 0);
        }
    }
}

use super::SeaOrmStorage;
use crate::errors::LmsError;
use crate::models::{
    assignments::requests::{CreateAssignmentRequest, NewSubmission},
    notifications::{entities::NewNotification, requests::NotificationListQuery},
    quizzes::requests::{CreateQuizRequest, NewQuestion},
    schedules::requests::{CreateScheduleRequest, ScheduleListQuery},
    students::requests::{CreateStudentRequest, UpdateStudentRequest},
    syllabus::requests::{CreateTopicRequest, SyllabusQuery, UpdateSubtopicRequest},
    teachers::requests::CreateTeacherRequest,
    users::entities::{AccountStatus, UserRole},
};

async fn storage() -> SeaOrmStorage {
    SeaOrmStorage::in_memory().await
}

fn student_req(email: &str, semester: i32) -> CreateStudentRequest {
    CreateStudentRequest {
        name: "Student".to_string(),
        email: email.to_string(),
        password: "hash".to_string(),
        semester,
        roll_number: None,
        department: None,
        phone: None,
    }
}

async fn teacher(storage: &SeaOrmStorage, email: &str) -> i64 {
    storage
        .create_teacher_impl(CreateTeacherRequest {
            name: "Teacher".to_string(),
            email: email.to_string(),
            password: "hash".to_string(),
            department: None,
            designation: None,
            phone: None,
        })
        .await
        .unwrap()
        .id
}

fn question(marks: i32) -> NewQuestion {
    NewQuestion {
        question_text: "2 + 2 = ?".to_string(),
        options: vec!["3".to_string(), "4".to_string()],
        correct_answer: 1,
        marks,
    }
}

fn quiz_req(questions: Option<Vec<NewQuestion>>) -> CreateQuizRequest {
    CreateQuizRequest {
        title: "Quiz".to_string(),
        description: None,
        subject: "Math".to_string(),
        semester: Some(3),
        duration_minutes: Some(10),
        is_published: Some(true),
        questions,
    }
}

#[tokio::test]
async fn test_duplicate_student_email_is_conflict() {
    let storage = storage().await;
    storage
        .create_student_impl(student_req("a@example.com", 1))
        .await
        .unwrap();

    let err = storage
        .create_student_impl(student_req("a@example.com", 2))
        .await
        .unwrap_err();
    assert!(matches!(err, LmsError::Conflict(_)));
}

#[tokio::test]
async fn test_active_student_ids_filter_by_semester() {
    let storage = storage().await;
    let s1 = storage
        .create_student_impl(student_req("s1@example.com", 3))
        .await
        .unwrap();
    let s2 = storage
        .create_student_impl(student_req("s2@example.com", 3))
        .await
        .unwrap();
    let s3 = storage
        .create_student_impl(student_req("s3@example.com", 5))
        .await
        .unwrap();

    storage
        .update_student_impl(
            s2.id,
            UpdateStudentRequest {
                status: Some(AccountStatus::Inactive),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let sem3 = storage.list_active_student_ids_impl(Some(3)).await.unwrap();
    assert_eq!(sem3, vec![s1.id]);

    let mut all = storage.list_active_student_ids_impl(None).await.unwrap();
    all.sort();
    assert_eq!(all, vec![s1.id, s3.id]);
}

#[tokio::test]
async fn test_quiz_questions_keep_total_marks_in_sync() {
    let storage = storage().await;
    let teacher_id = teacher(&storage, "t@example.com").await;

    let quiz = storage
        .create_quiz_impl(teacher_id, quiz_req(Some(vec![question(2), question(3)])))
        .await
        .unwrap();
    assert_eq!(quiz.total_marks, 5);

    let (questions, total) = storage
        .add_quiz_questions_impl(quiz.id, vec![question(4)])
        .await
        .unwrap();
    assert_eq!(total, 9);

    let positions: Vec<i32> = questions.iter().map(|q| q.position).collect();
    assert_eq!(positions, vec![0, 1, 2]);

    let quiz = storage.get_quiz_by_id_impl(quiz.id).await.unwrap().unwrap();
    assert_eq!(quiz.total_marks, 9);
}

#[tokio::test]
async fn test_total_marks_overflow_is_rejected() {
    let storage = storage().await;
    let teacher_id = teacher(&storage, "t@example.com").await;

    let result = storage
        .create_quiz_impl(
            teacher_id,
            quiz_req(Some(vec![question(i32::MAX), question(i32::MAX)])),
        )
        .await;
    assert!(matches!(result, Err(LmsError::Validation(_))));

    let quiz = storage
        .create_quiz_impl(teacher_id, quiz_req(Some(vec![question(i32::MAX)])))
        .await
        .unwrap();
    let result = storage
        .add_quiz_questions_impl(quiz.id, vec![question(1)])
        .await;
    assert!(matches!(result, Err(LmsError::Validation(_))));
    // 事务回滚，题目与总分保持不变
    assert_eq!(storage.list_quiz_questions_impl(quiz.id).await.unwrap().len(), 1);
    let quiz = storage.get_quiz_by_id_impl(quiz.id).await.unwrap().unwrap();
    assert_eq!(quiz.total_marks, i32::MAX);
}

#[tokio::test]
async fn test_add_questions_to_missing_quiz_writes_nothing() {
    let storage = storage().await;
    let result = storage.add_quiz_questions_impl(404, vec![question(1)]).await;
    assert!(result.is_err());
    assert!(storage.list_quiz_questions_impl(404).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_second_quiz_attempt_is_conflict() {
    let storage = storage().await;
    let teacher_id = teacher(&storage, "t@example.com").await;
    let student = storage
        .create_student_impl(student_req("s@example.com", 3))
        .await
        .unwrap();
    let quiz = storage
        .create_quiz_impl(teacher_id, quiz_req(Some(vec![question(1)])))
        .await
        .unwrap();

    let answers = serde_json::json!([1]);
    let attempt = storage
        .create_quiz_attempt_impl(quiz.id, student.id, 1, 1, &answers)
        .await
        .unwrap();
    assert_eq!(attempt.score, 1);

    let err = storage
        .create_quiz_attempt_impl(quiz.id, student.id, 0, 1, &answers)
        .await
        .unwrap_err();
    assert!(matches!(err, LmsError::Conflict(_)));

    let attempts = storage.list_quiz_attempts_impl(quiz.id).await.unwrap();
    assert_eq!(attempts.len(), 1);
    assert_eq!(attempts[0].student_name.as_deref(), Some("Student"));
}

#[tokio::test]
async fn test_resubmission_keeps_previous_file() {
    let storage = storage().await;
    let teacher_id = teacher(&storage, "t@example.com").await;
    let student = storage
        .create_student_impl(student_req("s@example.com", 3))
        .await
        .unwrap();
    let assignment = storage
        .create_assignment_impl(
            teacher_id,
            CreateAssignmentRequest {
                title: "Essay".to_string(),
                description: None,
                subject: "English".to_string(),
                semester: Some(3),
                due_date: None,
                max_marks: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(assignment.max_marks, 100);

    storage
        .upsert_submission_impl(NewSubmission {
            assignment_id: assignment.id,
            student_id: student.id,
            content: Some("v1".to_string()),
            file_name: Some("essay.pdf".to_string()),
            file_path: Some("uploads/essay.pdf".to_string()),
            is_late: false,
        })
        .await
        .unwrap();

    let second = storage
        .upsert_submission_impl(NewSubmission {
            assignment_id: assignment.id,
            student_id: student.id,
            content: Some("v2".to_string()),
            file_name: None,
            file_path: None,
            is_late: true,
        })
        .await
        .unwrap();

    assert_eq!(second.content.as_deref(), Some("v2"));
    assert_eq!(second.file_name.as_deref(), Some("essay.pdf"));
    assert_eq!(
        storage
            .list_submissions_by_assignment_impl(assignment.id)
            .await
            .unwrap()
            .len(),
        1
    );
}

#[tokio::test]
async fn test_notification_batch_and_read_state() {
    let storage = storage().await;

    let batch: Vec<NewNotification> = (1..=3)
        .map(|id| NewNotification {
            recipient_id: id,
            recipient_role: UserRole::Student,
            notification_type: "schedule".to_string(),
            title: "New schedule".to_string(),
            message: "Exam on Monday".to_string(),
            link: Some("/student/schedule".to_string()),
        })
        .collect();
    assert_eq!(storage.create_notifications_batch_impl(batch).await.unwrap(), 3);
    assert_eq!(
        storage.create_notifications_batch_impl(Vec::new()).await.unwrap(),
        0
    );

    assert_eq!(
        storage
            .get_unread_notification_count_impl(1, UserRole::Student)
            .await
            .unwrap(),
        1
    );
    // 同 id 不同角色互不可见
    assert_eq!(
        storage
            .get_unread_notification_count_impl(1, UserRole::Teacher)
            .await
            .unwrap(),
        0
    );

    let page = storage
        .list_notifications_with_pagination_impl(NotificationListQuery {
            page: 1,
            size: 20,
            recipient_id: 2,
            recipient_role: UserRole::Student,
            unread_only: true,
        })
        .await
        .unwrap();
    assert_eq!(page.items.len(), 1);

    assert_eq!(
        storage
            .mark_all_notifications_as_read_impl(2, UserRole::Student)
            .await
            .unwrap(),
        1
    );
    assert_eq!(
        storage
            .get_unread_notification_count_impl(2, UserRole::Student)
            .await
            .unwrap(),
        0
    );
}

#[tokio::test]
async fn test_notification_batch_beyond_parameter_limit() {
    let storage = storage().await;

    // 4500 行 × 8 参数，超出单条 INSERT 的绑定参数上限
    let batch: Vec<NewNotification> = (1..=4500)
        .map(|id| NewNotification {
            recipient_id: id,
            recipient_role: UserRole::Student,
            notification_type: "schedule".to_string(),
            title: "Holiday".to_string(),
            message: "Campus closed".to_string(),
            link: Some("/student/schedule".to_string()),
        })
        .collect();
    assert_eq!(
        storage.create_notifications_batch_impl(batch).await.unwrap(),
        4500
    );

    for id in [1, 500, 501, 4500] {
        assert_eq!(
            storage
                .get_unread_notification_count_impl(id, UserRole::Student)
                .await
                .unwrap(),
            1,
            "recipient {id}"
        );
    }
}

#[tokio::test]
async fn test_schedule_visibility_by_audience() {
    let storage = storage().await;
    let teacher_id = teacher(&storage, "t@example.com").await;

    for audience in ["Everyone", "Teachers", "Students (Sem 3)", "Students (Sem 5)"] {
        storage
            .create_schedule_impl(
                teacher_id,
                UserRole::Teacher,
                CreateScheduleRequest {
                    title: audience.to_string(),
                    description: None,
                    event_type: "exam".to_string(),
                    start_time: chrono::Utc::now(),
                    end_time: None,
                    location: None,
                    target_audience: audience.to_string(),
                },
            )
            .await
            .unwrap();
    }

    let page = storage
        .list_schedules_with_pagination_impl(ScheduleListQuery {
            page: 1,
            size: 20,
            event_type: None,
            from: None,
            to: None,
            visible_audiences: Some(vec![
                "Everyone".to_string(),
                "Students".to_string(),
                "Students (Sem 3)".to_string(),
            ]),
            creator: None,
        })
        .await
        .unwrap();

    let mut titles: Vec<String> = page.items.into_iter().map(|s| s.title).collect();
    titles.sort();
    assert_eq!(titles, vec!["Everyone", "Students (Sem 3)"]);
}

#[tokio::test]
async fn test_syllabus_progress() {
    let storage = storage().await;
    let teacher_id = teacher(&storage, "t@example.com").await;

    let topic = storage
        .create_syllabus_topic_impl(
            teacher_id,
            CreateTopicRequest {
                subject: "Physics".to_string(),
                semester: Some(1),
                title: "Mechanics".to_string(),
                description: None,
                subtopics: Some(vec![
                    "Kinematics".to_string(),
                    "Dynamics".to_string(),
                    " ".to_string(),
                ]),
            },
        )
        .await
        .unwrap();
    assert_eq!(topic.subtopics.len(), 2);

    storage
        .create_syllabus_subtopic_impl(topic.id, "Energy".to_string())
        .await
        .unwrap();

    let done = storage
        .update_syllabus_subtopic_impl(
            topic.subtopics[0].id,
            UpdateSubtopicRequest {
                is_completed: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert!(done.is_completed);
    assert!(done.completed_at.is_some());

    let progress = storage
        .get_syllabus_progress_impl(SyllabusQuery {
            subject: Some("Physics".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(progress.total_topics, 1);
    assert_eq!(progress.total_subtopics, 3);
    assert_eq!(progress.completed_subtopics, 1);
    assert_eq!(progress.percentage, 33.33);

    let undone = storage
        .update_syllabus_subtopic_impl(
            topic.subtopics[0].id,
            UpdateSubtopicRequest {
                is_completed: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert!(undone.completed_at.is_none());
}

#[tokio::test]
async fn test_admin_dashboard_counts() {
    let storage = storage().await;
    teacher(&storage, "t@example.com").await;
    storage
        .create_student_impl(student_req("s@example.com", 1))
        .await
        .unwrap();

    let stats = storage.get_admin_dashboard_stats_impl().await.unwrap();
    assert_eq!(stats.total_students, 1);
    assert_eq!(stats.total_teachers, 1);
    assert_eq!(stats.total_quizzes, 0);
}

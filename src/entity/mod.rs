//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。

pub mod prelude;

pub mod admins;
pub mod announcements;
pub mod assignment_submissions;
pub mod assignments;
pub mod feedback;
pub mod materials;
pub mod notifications;
pub mod quiz_attempts;
pub mod quiz_questions;
pub mod quizzes;
pub mod schedules;
pub mod startup_ideas;
pub mod students;
pub mod syllabus_subtopics;
pub mod syllabus_topics;
pub mod teachers;

use chrono::{DateTime, Utc};

// 数据库中的时间戳统一为 Unix 秒
pub(crate) fn to_datetime(ts: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()
}

pub(crate) fn to_datetime_opt(ts: Option<i64>) -> Option<DateTime<Utc>> {
    ts.and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0))
}

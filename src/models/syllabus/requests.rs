use serde::Deserialize;
use ts_rs::TS;

/// 创建大纲主题请求，可同时附带子主题标题
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/syllabus.ts")]
pub struct CreateTopicRequest {
    pub subject: String,
    pub semester: Option<i32>,
    pub title: String,
    pub description: Option<String>,
    pub subtopics: Option<Vec<String>>,
}

/// 更新大纲主题请求
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/syllabus.ts")]
pub struct UpdateTopicRequest {
    pub subject: Option<String>,
    pub semester: Option<i32>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub position: Option<i32>,
}

/// 创建子主题请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/syllabus.ts")]
pub struct CreateSubtopicRequest {
    pub title: String,
}

/// 更新子主题请求
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/syllabus.ts")]
pub struct UpdateSubtopicRequest {
    pub title: Option<String>,
    pub position: Option<i32>,
    pub is_completed: Option<bool>,
}

/// 大纲查询参数（主题列表与进度统计共用）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/syllabus.ts")]
pub struct SyllabusQuery {
    pub subject: Option<String>,
    pub semester: Option<i32>,
    pub teacher_id: Option<i64>,
}

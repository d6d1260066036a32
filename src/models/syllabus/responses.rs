use serde::Serialize;
use ts_rs::TS;

use super::entities::SyllabusTopic;

/// 主题列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/syllabus.ts")]
pub struct TopicListResponse {
    pub items: Vec<SyllabusTopic>,
}

/// 大纲完成进度
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/syllabus.ts")]
pub struct SyllabusProgressResponse {
    pub total_topics: i64,
    pub total_subtopics: i64,
    pub completed_subtopics: i64,
    pub percentage: f64,
}

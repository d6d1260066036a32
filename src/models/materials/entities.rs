use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/material.ts")]
pub struct Material {
    pub id: i64,
    pub teacher_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub subject: String,
    pub semester: Option<i32>,
    // 原始文件名
    pub file_name: String,
    // 磁盘存储路径，不返回给前端
    #[serde(skip_serializing, default)]
    #[ts(skip)]
    pub file_path: String,
    pub file_size: i64,
    pub file_type: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

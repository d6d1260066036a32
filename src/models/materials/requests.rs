use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::pagination::PaginationQuery;

/// 上传资料的表单字段（multipart 中除文件外的部分）
#[derive(Debug, Clone, Default)]
pub struct MaterialForm {
    pub title: Option<String>,
    pub description: Option<String>,
    pub subject: Option<String>,
    pub semester: Option<i32>,
}

/// 写入存储层的新资料记录
#[derive(Debug, Clone)]
pub struct NewMaterial {
    pub teacher_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub subject: String,
    pub semester: Option<i32>,
    pub file_name: String,
    pub file_path: String,
    pub file_size: i64,
    pub file_type: String,
}

/// 资料列表查询参数（HTTP 请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/material.ts")]
pub struct MaterialListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub subject: Option<String>,
    pub semester: Option<i32>,
    pub teacher_id: Option<i64>,
    pub search: Option<String>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone, Default)]
pub struct MaterialListQuery {
    pub page: u64,
    pub size: u64,
    pub subject: Option<String>,
    pub semester: Option<i32>,
    pub teacher_id: Option<i64>,
    pub search: Option<String>,
    /// 学生视角：仅本学期或未指定学期的资料
    pub visible_semester: Option<i32>,
}

impl From<MaterialListParams> for MaterialListQuery {
    fn from(params: MaterialListParams) -> Self {
        let (page, size) = params.pagination.normalized();
        Self {
            page,
            size,
            subject: params.subject,
            semester: params.semester,
            teacher_id: params.teacher_id,
            search: params.search,
            visible_semester: None,
        }
    }
}

use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::pagination::PaginationQuery;
use crate::models::users::entities::AccountStatus;

/// 管理员创建学生请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct CreateStudentRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub semester: i32,
    pub roll_number: Option<String>,
    pub department: Option<String>,
    pub phone: Option<String>,
}

/// 更新学生请求，所有字段可选
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct UpdateStudentRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub semester: Option<i32>,
    pub roll_number: Option<String>,
    pub department: Option<String>,
    pub phone: Option<String>,
    pub status: Option<AccountStatus>,
}

/// 学生列表查询参数（HTTP 请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub semester: Option<i32>,
    pub department: Option<String>,
    pub status: Option<AccountStatus>,
    pub search: Option<String>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone, Default)]
pub struct StudentListQuery {
    pub page: u64,
    pub size: u64,
    pub semester: Option<i32>,
    pub department: Option<String>,
    pub status: Option<AccountStatus>,
    pub search: Option<String>,
}

impl From<StudentListParams> for StudentListQuery {
    fn from(params: StudentListParams) -> Self {
        let (page, size) = params.pagination.normalized();
        Self {
            page,
            size,
            semester: params.semester,
            department: params.department,
            status: params.status,
            search: params.search,
        }
    }
}

use serde::Deserialize;
use ts_rs::TS;

use super::entities::IdeaStatus;
use crate::models::common::pagination::PaginationQuery;

/// 提交创业想法请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/startup_idea.ts")]
pub struct CreateStartupIdeaRequest {
    pub title: String,
    pub description: String,
    pub category: Option<String>,
}

/// 更新创业想法请求（仅待审核时可修改）
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/startup_idea.ts")]
pub struct UpdateStartupIdeaRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
}

/// 审核请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/startup_idea.ts")]
pub struct ReviewStartupIdeaRequest {
    pub status: IdeaStatus,
    pub reviewer_comment: Option<String>,
}

/// 创业想法列表查询参数（HTTP 请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/startup_idea.ts")]
pub struct StartupIdeaListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub status: Option<IdeaStatus>,
    pub category: Option<String>,
    pub search: Option<String>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone, Default)]
pub struct StartupIdeaListQuery {
    pub page: u64,
    pub size: u64,
    pub status: Option<IdeaStatus>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub student_id: Option<i64>,
}

impl From<StartupIdeaListParams> for StartupIdeaListQuery {
    fn from(params: StartupIdeaListParams) -> Self {
        let (page, size) = params.pagination.normalized();
        Self {
            page,
            size,
            status: params.status,
            category: params.category,
            search: params.search,
            student_id: None,
        }
    }
}

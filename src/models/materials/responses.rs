use serde::Serialize;
use ts_rs::TS;

use super::entities::Material;
use crate::models::common::pagination::PaginationInfo;

/// 资料列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/material.ts")]
pub struct MaterialListResponse {
    pub items: Vec<Material>,
    pub pagination: PaginationInfo,
}

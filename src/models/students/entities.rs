use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::users::entities::AccountStatus;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub roll_number: Option<String>,
    pub semester: i32,
    pub department: Option<String>,
    pub phone: Option<String>,
    pub status: AccountStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

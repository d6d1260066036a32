use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 创业想法审核状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/startup_idea.ts")]
pub enum IdeaStatus {
    Pending,
    UnderReview,
    Approved,
    Rejected,
}

impl std::fmt::Display for IdeaStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdeaStatus::Pending => write!(f, "pending"),
            IdeaStatus::UnderReview => write!(f, "under_review"),
            IdeaStatus::Approved => write!(f, "approved"),
            IdeaStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl std::str::FromStr for IdeaStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(IdeaStatus::Pending),
            "under_review" => Ok(IdeaStatus::UnderReview),
            "approved" => Ok(IdeaStatus::Approved),
            "rejected" => Ok(IdeaStatus::Rejected),
            _ => Err(format!("无效的想法状态: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/startup_idea.ts")]
pub struct StartupIdea {
    pub id: i64,
    pub student_id: i64,
    pub student_name: Option<String>,
    pub title: String,
    pub description: String,
    pub category: Option<String>,
    pub status: IdeaStatus,
    pub reviewer_comment: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct Assignment {
    pub id: i64,
    pub teacher_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub subject: String,
    pub semester: Option<i32>,
    pub due_date: Option<chrono::DateTime<chrono::Utc>>,
    pub max_marks: i32,
    // 附件原始文件名
    pub attachment_name: Option<String>,
    #[serde(skip_serializing, default)]
    #[ts(skip)]
    pub attachment_path: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Assignment {
    /// 以给定时间判断是否已过截止时间
    pub fn is_past_due(&self, now: chrono::DateTime<chrono::Utc>) -> bool {
        self.due_date.is_some_and(|due| now > due)
    }
}

// 提交状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub enum SubmissionStatus {
    Submitted,
    Late,
    Graded,
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionStatus::Submitted => write!(f, "submitted"),
            SubmissionStatus::Late => write!(f, "late"),
            SubmissionStatus::Graded => write!(f, "graded"),
        }
    }
}

impl std::str::FromStr for SubmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "submitted" => Ok(SubmissionStatus::Submitted),
            "late" => Ok(SubmissionStatus::Late),
            "graded" => Ok(SubmissionStatus::Graded),
            _ => Err(format!("无效的提交状态: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignmentSubmission {
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    // 学生姓名与学号（列表查询时填充）
    pub student_name: Option<String>,
    pub roll_number: Option<String>,
    pub content: Option<String>,
    pub file_name: Option<String>,
    #[serde(skip_serializing, default)]
    #[ts(skip)]
    pub file_path: Option<String>,
    pub status: SubmissionStatus,
    pub marks: Option<i32>,
    pub feedback: Option<String>,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub graded_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn assignment(due_date: Option<chrono::DateTime<Utc>>) -> Assignment {
        let now = Utc::now();
        Assignment {
            id: 1,
            teacher_id: 1,
            title: "Essay".to_string(),
            description: None,
            subject: "English".to_string(),
            semester: None,
            due_date,
            max_marks: 100,
            attachment_name: None,
            attachment_path: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_past_due() {
        let now = Utc::now();
        assert!(!assignment(None).is_past_due(now));
        assert!(assignment(Some(now - Duration::hours(1))).is_past_due(now));
        assert!(!assignment(Some(now + Duration::hours(1))).is_past_due(now));
    }

    #[test]
    fn test_attachment_path_is_not_serialized() {
        let mut a = assignment(None);
        a.attachment_path = Some("uploads/secret.bin".to_string());
        let json = serde_json::to_string(&a).unwrap();
        assert!(!json.contains("secret.bin"));
    }
}

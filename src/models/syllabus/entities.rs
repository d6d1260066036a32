use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/syllabus.ts")]
pub struct SyllabusSubtopic {
    pub id: i64,
    pub topic_id: i64,
    pub title: String,
    pub position: i32,
    pub is_completed: bool,
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/syllabus.ts")]
pub struct SyllabusTopic {
    pub id: i64,
    pub teacher_id: i64,
    pub subject: String,
    pub semester: Option<i32>,
    pub title: String,
    pub description: Option<String>,
    pub position: i32,
    pub subtopics: Vec<SyllabusSubtopic>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl SyllabusTopic {
    /// 子主题完成百分比，没有子主题时为 0
    pub fn progress(&self) -> f64 {
        completion_percentage(
            self.subtopics.iter().filter(|s| s.is_completed).count(),
            self.subtopics.len(),
        )
    }
}

pub fn completion_percentage(completed: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let pct = completed as f64 * 100.0 / total as f64;
    (pct * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_percentage() {
        assert_eq!(completion_percentage(0, 0), 0.0);
        assert_eq!(completion_percentage(1, 4), 25.0);
        assert_eq!(completion_percentage(1, 3), 33.33);
        assert_eq!(completion_percentage(3, 3), 100.0);
    }
}

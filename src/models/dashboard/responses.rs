use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Clone, Default, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct AdminDashboardStats {
    pub total_students: i64,
    pub total_teachers: i64,
    pub total_quizzes: i64,
    pub total_assignments: i64,
    pub total_materials: i64,
    pub pending_startup_ideas: i64,
    pub unanswered_feedback: i64,
}

#[derive(Debug, Clone, Default, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct TeacherDashboardStats {
    pub my_quizzes: i64,
    pub my_assignments: i64,
    pub my_materials: i64,
    pub ungraded_submissions: i64,
    pub unread_notifications: i64,
}

#[derive(Debug, Clone, Default, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct StudentDashboardStats {
    pub available_quizzes: i64,
    pub attempted_quizzes: i64,
    pub assignments: i64,
    pub submitted_assignments: i64,
    pub upcoming_schedules: i64,
    pub unread_notifications: i64,
}

/// 按角色区分的仪表盘统计
#[derive(Debug, Clone, Serialize, TS)]
#[serde(tag = "role", rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub enum DashboardStats {
    Admin(AdminDashboardStats),
    Teacher(TeacherDashboardStats),
    Student(StudentDashboardStats),
}

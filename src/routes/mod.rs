pub mod announcements;

pub mod assignments;

pub mod auth;

pub mod dashboard;

pub mod feedback;

pub mod frontend;

pub mod materials;

pub mod notifications;

pub mod quizzes;

pub mod schedules;

pub mod startup_ideas;

pub mod students;

pub mod syllabus;

pub mod system;

pub mod teachers;

pub use announcements::configure_announcement_routes;
pub use assignments::configure_assignment_routes;
pub use auth::configure_auth_routes;
pub use dashboard::configure_dashboard_routes;
pub use feedback::configure_feedback_routes;
pub use frontend::configure_frontend_routes;
pub use materials::configure_material_routes;
pub use notifications::configure_notification_routes;
pub use quizzes::configure_quiz_routes;
pub use schedules::configure_schedule_routes;
pub use startup_ideas::configure_startup_idea_routes;
pub use students::configure_student_routes;
pub use syllabus::configure_syllabus_routes;
pub use system::configure_system_routes;
pub use teachers::configure_teacher_routes;

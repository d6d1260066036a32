//! 目标受众表达式解析
//!
//! 日程与公告的 `target_audience` 是面向人的字符串，取值为
//! `Everyone`、`Teachers`、`Students` 或 `Students (Sem N)`。
//! 无法识别的字符串解析为 [`Audience::Unrecognized`]，不匹配任何接收者。

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::users::entities::{AuthUser, UserRole};

static SEMESTER_AUDIENCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^Students\s*\(\s*Sem\s+(\d+)\s*\)$").expect("Invalid audience regex")
});

pub const EVERYONE: &str = "Everyone";
pub const TEACHERS: &str = "Teachers";
pub const STUDENTS: &str = "Students";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Audience {
    Everyone,
    Teachers,
    Students,
    Semester(i32),
    Unrecognized(String),
}

/// 学生接收范围
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentScope {
    All,
    Semester(i32),
}

impl Audience {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed {
            EVERYONE => return Audience::Everyone,
            TEACHERS => return Audience::Teachers,
            STUDENTS => return Audience::Students,
            _ => {}
        }

        SEMESTER_AUDIENCE_RE
            .captures(trimmed)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<i32>().ok())
            .map(Audience::Semester)
            .unwrap_or_else(|| Audience::Unrecognized(trimmed.to_string()))
    }

    pub fn includes_teachers(&self) -> bool {
        matches!(self, Audience::Everyone | Audience::Teachers)
    }

    pub fn student_scope(&self) -> Option<StudentScope> {
        match self {
            Audience::Everyone | Audience::Students => Some(StudentScope::All),
            Audience::Semester(n) => Some(StudentScope::Semester(*n)),
            Audience::Teachers | Audience::Unrecognized(_) => None,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Audience::Unrecognized(_))
    }

    /// 判断某个用户是否在受众范围内，管理员总是可见
    pub fn reaches(&self, user: &AuthUser) -> bool {
        match user.role {
            UserRole::Admin => true,
            UserRole::Teacher => self.includes_teachers(),
            UserRole::Student => match self.student_scope() {
                Some(StudentScope::All) => true,
                Some(StudentScope::Semester(n)) => user.semester == Some(n),
                None => false,
            },
        }
    }

    /// 用户可见的规范化受众标签集合，用于列表 SQL 过滤。管理员返回 None（不过滤）
    pub fn visible_labels(user: &AuthUser) -> Option<Vec<String>> {
        match user.role {
            UserRole::Admin => None,
            UserRole::Teacher => Some(vec![EVERYONE.to_string(), TEACHERS.to_string()]),
            UserRole::Student => {
                let mut labels = vec![EVERYONE.to_string(), STUDENTS.to_string()];
                if let Some(semester) = user.semester {
                    labels.push(Audience::Semester(semester).to_string());
                }
                Some(labels)
            }
        }
    }
}

impl fmt::Display for Audience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Audience::Everyone => f.write_str(EVERYONE),
            Audience::Teachers => f.write_str(TEACHERS),
            Audience::Students => f.write_str(STUDENTS),
            Audience::Semester(n) => write!(f, "Students (Sem {n})"),
            Audience::Unrecognized(raw) => f.write_str(raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::AccountStatus;

    fn user(role: UserRole, semester: Option<i32>) -> AuthUser {
        AuthUser {
            id: 1,
            role,
            name: "u".to_string(),
            email: "u@example.com".to_string(),
            semester,
            status: AccountStatus::Active,
        }
    }

    #[test]
    fn test_parse_literals() {
        assert_eq!(Audience::parse("Everyone"), Audience::Everyone);
        assert_eq!(Audience::parse(" Teachers "), Audience::Teachers);
        assert_eq!(Audience::parse("Students"), Audience::Students);
    }

    #[test]
    fn test_parse_semester() {
        assert_eq!(Audience::parse("Students (Sem 3)"), Audience::Semester(3));
        assert_eq!(Audience::parse("Students(Sem 12)"), Audience::Semester(12));
        assert_eq!(Audience::Semester(3).to_string(), "Students (Sem 3)");
    }

    #[test]
    fn test_unparsable_semester_is_unrecognized() {
        let audience = Audience::parse("Students (Sem X)");
        assert_eq!(audience, Audience::Unrecognized("Students (Sem X)".to_string()));
        assert!(!audience.includes_teachers());
        assert_eq!(audience.student_scope(), None);
        assert!(!audience.is_recognized());
    }

    #[test]
    fn test_scopes() {
        assert!(Audience::Everyone.includes_teachers());
        assert_eq!(Audience::Everyone.student_scope(), Some(StudentScope::All));
        assert_eq!(Audience::Teachers.student_scope(), None);
        assert!(!Audience::Semester(2).includes_teachers());
        assert_eq!(
            Audience::Semester(2).student_scope(),
            Some(StudentScope::Semester(2))
        );
    }

    #[test]
    fn test_reaches() {
        let sem3 = user(UserRole::Student, Some(3));
        assert!(Audience::Semester(3).reaches(&sem3));
        assert!(!Audience::Semester(4).reaches(&sem3));
        assert!(!Audience::Teachers.reaches(&sem3));
        assert!(Audience::Teachers.reaches(&user(UserRole::Teacher, None)));
        assert!(Audience::Unrecognized("x".into()).reaches(&user(UserRole::Admin, None)));
    }

    #[test]
    fn test_visible_labels() {
        assert_eq!(Audience::visible_labels(&user(UserRole::Admin, None)), None);
        let labels = Audience::visible_labels(&user(UserRole::Student, Some(5))).unwrap();
        assert_eq!(labels, vec!["Everyone", "Students", "Students (Sem 5)"]);
    }
}

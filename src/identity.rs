use crate::db::models::{Student, SystemUser, Teacher};

pub const TEACHER_ROLE: &str = "teacher";
pub const STUDENT_ROLE: &str = "student";

/// A user resolved from one of the three credential tables
#[derive(Debug, Clone)]
pub enum Identity {
    SystemUser(SystemUser),
    Teacher(Teacher),
    Student(Student),
}

impl Identity {
    pub fn id(&self) -> i64 {
        match self {
            Identity::SystemUser(u) => u.id,
            Identity::Teacher(t) => t.id,
            Identity::Student(s) => s.id,
        }
    }

    pub fn email(&self) -> &str {
        match self {
            Identity::SystemUser(u) => &u.email,
            Identity::Teacher(t) => &t.email,
            Identity::Student(s) => &s.email,
        }
    }

    /// Display name, whichever column the owning table keeps it in
    pub fn display_name(&self) -> &str {
        match self {
            Identity::SystemUser(u) => &u.name,
            Identity::Teacher(t) => &t.teacher_name,
            Identity::Student(s) => &s.student_name,
        }
    }

    pub fn role(&self) -> &str {
        match self {
            Identity::SystemUser(u) => &u.role,
            Identity::Teacher(_) => TEACHER_ROLE,
            Identity::Student(_) => STUDENT_ROLE,
        }
    }

    /// Stored password hash. An empty column counts as never set.
    pub fn password_hash(&self) -> Option<&str> {
        let stored = match self {
            Identity::SystemUser(u) => u.password.as_deref(),
            Identity::Teacher(t) => t.password.as_deref(),
            Identity::Student(s) => s.password.as_deref(),
        };
        stored.filter(|hash| !hash.is_empty())
    }

    pub fn image(&self) -> Option<&str> {
        match self {
            Identity::SystemUser(u) => u.image.as_deref(),
            Identity::Teacher(t) => t.image.as_deref(),
            Identity::Student(s) => s.image.as_deref(),
        }
    }
}

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Account roles. Stored as TEXT and checked by the schema as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum Role {
    MainAdmin,
    DeptAdmin,
    Staff,
}

impl Role {
    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "main_admin" => Some(Role::MainAdmin),
            "dept_admin" => Some(Role::DeptAdmin),
            "staff" => Some(Role::Staff),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::MainAdmin => "main_admin",
            Role::DeptAdmin => "dept_admin",
            Role::Staff => "staff",
        }
    }
}

/// Sub-role of teaching staff, only meaningful when `Role::Staff`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum StaffRole {
    AssistantProfessor,
    Professor,
    Hod,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub department_id: Option<i64>,
    pub staff_role: Option<StaffRole>,
    pub subjects_selected: Option<String>,
    pub subjects_locked: bool,
    pub created_at: NaiveDateTime,
}

impl User {
    /// Subject ids picked by a staff member, stored as a comma-separated
    /// list in the `subjects_selected` column.
    pub fn selected_subject_ids(&self) -> Vec<i64> {
        self.subjects_selected
            .as_deref()
            .unwrap_or("")
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Department {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Subject {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub department_id: i64,
    pub credits: i64,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Classroom {
    pub id: i64,
    pub name: String,
    pub capacity: i64,
    pub department_id: i64,
    pub created_at: NaiveDateTime,
}

/// One scheduled (day, slot, subject, staff, room) session.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TimetableEntry {
    pub id: i64,
    pub department_id: i64,
    pub day: String,
    pub time_slot: String,
    pub subject_id: i64,
    pub staff_id: i64,
    pub classroom_id: i64,
    pub created_at: NaiveDateTime,
}

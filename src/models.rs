use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Completion vectors are stored with a fixed slot count so a month's bits
/// keep their positions across months of different lengths; slots past the
/// month's day count stay false.
pub const MONTH_SLOTS: usize = 31;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    Active,
    Paused,
    PendingReset,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub salt: String,
    pub role: Role,
    pub status: UserStatus,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub avatar_url: String,
    pub joined: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitRecord {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub active: bool,
    /// Month key ("YYYY-MM") to completion bits, one slot per day.
    pub months: BTreeMap<String, Vec<bool>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SleepRecord {
    pub id: i64,
    pub user_id: i64,
    pub date: NaiveDate,
    pub hours: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    pub users: Vec<UserRecord>,
    pub habits: Vec<HabitRecord>,
    pub sleep: Vec<SleepRecord>,
    /// Bearer token to user id. Logout removes the token.
    pub sessions: BTreeMap<String, i64>,
    pub next_user_id: i64,
    pub next_habit_id: i64,
    pub next_sleep_id: i64,
}

impl AppData {
    pub fn user(&self, id: i64) -> Option<&UserRecord> {
        self.users.iter().find(|user| user.id == id)
    }

    pub fn user_mut(&mut self, id: i64) -> Option<&mut UserRecord> {
        self.users.iter_mut().find(|user| user.id == id)
    }

    pub fn user_by_email(&self, email: &str) -> Option<&UserRecord> {
        self.users.iter().find(|user| user.email == email)
    }

    pub fn alloc_user_id(&mut self) -> i64 {
        self.next_user_id += 1;
        self.next_user_id
    }

    pub fn alloc_habit_id(&mut self) -> i64 {
        self.next_habit_id += 1;
        self.next_habit_id
    }

    pub fn alloc_sleep_id(&mut self) -> i64 {
        self.next_sleep_id += 1;
        self.next_sleep_id
    }
}

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ProfileUpdateRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OwnPasswordRequest {
    pub current_password: Option<String>,
    pub new_password: String,
}

#[derive(Debug, Deserialize)]
pub struct AddHabitRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub day_index: usize,
    /// Absent means flip the current value.
    pub done: Option<bool>,
    pub month: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SleepLogRequest {
    pub date: NaiveDate,
    pub hours: f64,
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    /// Absent means the account starts in pending_reset until a password is set.
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub status: Option<UserStatus>,
}

#[derive(Debug, Deserialize)]
pub struct PasswordResetRequest {
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    pub month: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub user_id: Option<i64>,
    pub month: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UsersQuery {
    pub query: Option<String>,
    pub page: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub reset_required: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub status: UserStatus,
    pub bio: String,
    pub avatar_url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

/// One habit's completion row for a single month or window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitRow {
    pub id: i64,
    pub habit: String,
    pub days: Vec<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HabitsResponse {
    pub habits: Vec<String>,
    pub habit_matrix: Vec<HabitRow>,
    pub days: usize,
    pub month: String,
    pub available_months: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AddHabitResponse {
    pub habit_matrix: Vec<HabitRow>,
    pub habit: Option<HabitRow>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MatrixResponse {
    pub habit_matrix: Vec<HabitRow>,
}

/// Three-way partition of a success percentage. Components sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Band {
    pub good: u32,
    pub on_track: u32,
    pub needs_focus: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopHabit {
    pub name: String,
    pub total: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardStats {
    pub success_rate: u32,
    pub success_trend: String,
    pub streak_days: u32,
    pub completed_habits: u32,
    pub total_habits: usize,
    pub active_users: usize,
    pub total_habits_tracked: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub stats: DashboardStats,
    pub band: Band,
    pub top_habits: Vec<TopHabit>,
    pub daily_counts: Vec<u32>,
    pub success_rate: u32,
    pub month: String,
    pub available_months: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SleepEntryOut {
    pub id: i64,
    pub date: NaiveDate,
    pub hours: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SleepCategory {
    pub label: String,
    pub min_hours: f64,
    pub max_hours: Option<f64>,
    pub count: usize,
    pub percent: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SleepResponse {
    pub entries: Vec<SleepEntryOut>,
    /// One slot per day of the month; None renders as a gap, not a zero bar.
    pub daily_hours: Vec<Option<f64>>,
    pub rolling_average: Vec<Option<f64>>,
    pub categories: Vec<SleepCategory>,
    pub average_hours: f64,
    pub best_sleep: f64,
    pub total_entries: usize,
    pub days: usize,
    pub month: String,
    pub available_months: Vec<String>,
    pub editable: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub status: UserStatus,
    pub joined: NaiveDate,
    pub habits: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UsersPageResponse {
    pub users: Vec<UserSummary>,
    pub total: usize,
    pub page: usize,
    pub total_pages: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserListResponse {
    pub users: Vec<UserSummary>,
    pub total: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateUserResponse {
    pub user: UserSummary,
    pub users: Vec<UserSummary>,
    pub total: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AdminStats {
    pub overall_success_rate: u32,
    pub success_trend: String,
    pub total_habits: usize,
    pub active_users: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TopSleeper {
    pub name: String,
    pub email: String,
    pub average_hours: f64,
    pub total_entries: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SleepReport {
    pub average_hours: f64,
    pub total_entries: usize,
    pub total_hours: f64,
    pub top_sleepers: Vec<TopSleeper>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AdminReport {
    pub total_users: usize,
    pub total_habits: usize,
    pub total_completed: u32,
    pub total_slots: usize,
    pub success_rate: u32,
    pub success_trend: String,
    pub daily_counts: Vec<u32>,
    pub top_habits: Vec<TopHabit>,
    pub sleep_report: SleepReport,
}

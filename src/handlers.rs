use crate::auth;
use crate::errors::AppError;
use crate::models::*;
use crate::month;
use crate::paging;
use crate::sleep_stats;
use crate::state::AppState;
use crate::stats;
use crate::storage::persist_data;
use crate::ui::render_index;
use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    response::Html,
    Json,
};
use chrono::{Datelike, NaiveDate};

/// Community aggregation window, in days.
const TRACK_WINDOW_DAYS: usize = 30;

fn resolve_month(param: Option<&String>, today: NaiveDate) -> Result<NaiveDate, AppError> {
    match param {
        Some(value) => {
            month::parse_month(value).ok_or_else(|| AppError::bad_request("Invalid month"))
        }
        None => Ok(month::month_start(today)),
    }
}

/// Habits shown for a month: active ones for the current month, and for past
/// months the frozen set that has bits recorded there.
fn month_habits<'a>(
    data: &'a AppData,
    user_id: i64,
    month_key: &str,
    is_current: bool,
) -> Vec<&'a HabitRecord> {
    data.habits
        .iter()
        .filter(|habit| habit.user_id == user_id)
        .filter(|habit| {
            if is_current {
                habit.active
            } else {
                habit.months.contains_key(month_key)
            }
        })
        .collect()
}

fn habit_month_keys(data: &AppData, user_id: i64) -> Vec<String> {
    data.habits
        .iter()
        .filter(|habit| habit.user_id == user_id)
        .flat_map(|habit| habit.months.keys().cloned())
        .collect()
}

fn active_habit_count(data: &AppData, user_id: i64) -> usize {
    data.habits
        .iter()
        .filter(|habit| habit.user_id == user_id && habit.active)
        .count()
}

fn summarize(data: &AppData, user: &UserRecord) -> UserSummary {
    UserSummary {
        id: user.id,
        name: user.name.clone(),
        email: user.email.clone(),
        status: user.status,
        joined: user.joined,
        habits: active_habit_count(data, user.id),
    }
}

/// All users, newest first.
fn summaries(data: &AppData) -> Vec<UserSummary> {
    let mut users: Vec<&UserRecord> = data.users.iter().collect();
    users.sort_by(|a, b| b.id.cmp(&a.id));
    users.into_iter().map(|user| summarize(data, user)).collect()
}

fn profile_of(user: &UserRecord) -> ProfileResponse {
    ProfileResponse {
        id: user.id,
        name: user.name.clone(),
        email: user.email.clone(),
        status: user.status,
        bio: user.bio.clone(),
        avatar_url: user.avatar_url.clone(),
    }
}

fn current_matrix(data: &AppData, user_id: i64, today: NaiveDate) -> Vec<HabitRow> {
    let month_first = month::month_start(today);
    let key = month::month_key(month_first);
    let habits = month_habits(data, user_id, &key, true);
    stats::month_matrix(&habits, &key, month::days_in_month(month_first))
}

fn build_dashboard(
    data: &AppData,
    user_id: i64,
    month_first: NaiveDate,
    today: NaiveDate,
) -> DashboardResponse {
    let key = month::month_key(month_first);
    let is_current = month::is_current_month(month_first, today);
    let day_count = month::days_in_month(month_first);
    let habits = month_habits(data, user_id, &key, is_current);
    let matrix = stats::month_matrix(&habits, &key, day_count);

    let daily_counts = stats::daily_counts(&matrix, day_count);
    let effective = stats::effective_counts(&daily_counts, is_current, today.day());
    let success_rate = stats::success_rate(effective, matrix.len());
    let success_trend = stats::success_trend(effective, matrix.len());
    let streak_days = stats::streak_days(effective, matrix.len());

    let today_index = if daily_counts.is_empty() {
        0
    } else if is_current {
        (today.day() as usize - 1).min(daily_counts.len() - 1)
    } else {
        daily_counts.len() - 1
    };
    let completed_habits = daily_counts.get(today_index).copied().unwrap_or(0);

    let active_users = data
        .users
        .iter()
        .filter(|user| user.status == UserStatus::Active)
        .count();
    let total_habits_tracked = data.habits.iter().filter(|habit| habit.active).count();

    DashboardResponse {
        stats: DashboardStats {
            success_rate,
            success_trend,
            streak_days,
            completed_habits,
            total_habits: matrix.len(),
            active_users,
            total_habits_tracked,
        },
        band: stats::band(success_rate),
        top_habits: stats::top_habits(&matrix, 3),
        daily_counts,
        success_rate,
        month: key,
        available_months: month::available_months(habit_month_keys(data, user_id), today),
    }
}

fn build_sleep(
    data: &AppData,
    user_id: i64,
    month_first: NaiveDate,
    today: NaiveDate,
) -> SleepResponse {
    let key = month::month_key(month_first);
    let user_entries: Vec<&SleepRecord> = data
        .sleep
        .iter()
        .filter(|entry| entry.user_id == user_id)
        .collect();

    let mut entries: Vec<SleepEntryOut> = user_entries
        .iter()
        .filter(|entry| month::month_start(entry.date) == month_first)
        .map(|entry| SleepEntryOut {
            id: entry.id,
            date: entry.date,
            hours: entry.hours,
        })
        .collect();
    entries.sort_by_key(|entry| entry.date);

    let owned: Vec<SleepRecord> = user_entries.iter().map(|entry| (*entry).clone()).collect();
    let daily_hours = sleep_stats::monthly_hours(&owned, month_first, today);
    let rolling_average = sleep_stats::rolling_average(&daily_hours);
    let logged: Vec<f64> = daily_hours.iter().flatten().copied().collect();

    SleepResponse {
        rolling_average,
        categories: sleep_stats::categories(&logged),
        average_hours: sleep_stats::average_hours(&logged),
        best_sleep: sleep_stats::best_sleep(&logged),
        total_entries: logged.len(),
        days: daily_hours.len(),
        daily_hours,
        entries,
        month: key,
        available_months: month::available_months(
            user_entries
                .iter()
                .map(|entry| month::month_key(entry.date)),
            today,
        ),
        editable: month::is_current_month(month_first, today),
    }
}

fn community_report(data: &AppData, today: NaiveDate) -> AdminReport {
    let window = month::trailing_window(today, TRACK_WINDOW_DAYS);
    let rows: Vec<HabitRow> = data
        .habits
        .iter()
        .filter(|habit| habit.active)
        .map(|habit| HabitRow {
            id: habit.id,
            habit: habit.name.clone(),
            days: stats::window_row(habit, &window),
        })
        .collect();

    let daily_counts = stats::daily_counts(&rows, window.len());
    let total_completed: u32 = daily_counts.iter().sum();
    AdminReport {
        total_users: data.users.len(),
        total_habits: rows.len(),
        total_completed,
        total_slots: rows.len() * window.len(),
        success_rate: stats::success_rate(&daily_counts, rows.len()),
        success_trend: stats::success_trend(&daily_counts, rows.len()),
        top_habits: stats::rank(stats::merged_totals(&rows), 10),
        daily_counts,
        sleep_report: sleep_stats::sleep_report(&data.users, &data.sleep, &window),
    }
}

// --- pages ---

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let data = state.data.lock().await;
    let active_users = data
        .users
        .iter()
        .filter(|user| user.status == UserStatus::Active)
        .count();
    let habits_tracked = data.habits.iter().filter(|habit| habit.active).count();
    Html(render_index(active_users, habits_tracked, data.sleep.len()))
}

pub async fn health() -> Json<StatusResponse> {
    Json(StatusResponse::ok())
}

// --- auth ---

pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let name = payload.name.trim().to_string();
    let email = auth::normalize_email(&payload.email);
    if name.is_empty() {
        return Err(AppError::bad_request("Name is required"));
    }
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::bad_request("Invalid email"));
    }
    if payload.password.len() < 8 {
        return Err(AppError::bad_request("Password must be at least 8 characters"));
    }

    let mut data = state.data.lock().await;
    if data.user_by_email(&email).is_some() {
        return Err(AppError::bad_request("Email already registered"));
    }

    let salt = auth::new_salt();
    let id = data.alloc_user_id();
    data.users.push(UserRecord {
        id,
        name,
        email,
        password_hash: auth::hash_password(&payload.password, &salt),
        salt,
        role: Role::User,
        status: UserStatus::Active,
        bio: String::new(),
        avatar_url: String::new(),
        joined: state.today(),
    });

    let token = auth::new_token();
    data.sessions.insert(token.clone(), id);
    persist_data(&state.data_path, &data).await?;

    Ok(Json(TokenResponse {
        access_token: token,
        reset_required: false,
    }))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let email = auth::normalize_email(&payload.email);
    let mut data = state.data.lock().await;

    let user = data
        .user_by_email(&email)
        .filter(|user| auth::verify_password(&payload.password, user))
        .ok_or_else(|| AppError::unauthorized("Invalid credentials"))?;
    if user.status == UserStatus::Paused {
        return Err(AppError::forbidden("Account is paused"));
    }
    let user_id = user.id;
    let reset_required = user.status == UserStatus::PendingReset;

    let token = auth::new_token();
    data.sessions.insert(token.clone(), user_id);
    persist_data(&state.data_path, &data).await?;

    Ok(Json(TokenResponse {
        access_token: token,
        reset_required,
    }))
}

pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<StatusResponse>, AppError> {
    let mut data = state.data.lock().await;
    auth::authorize(&data, &headers)?;
    if let Some(token) = auth::bearer_token(&headers) {
        let token = token.to_string();
        data.sessions.remove(&token);
    }
    persist_data(&state.data_path, &data).await?;
    Ok(Json(StatusResponse::ok()))
}

// --- profile ---

pub async fn get_me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ProfileResponse>, AppError> {
    let data = state.data.lock().await;
    let user = auth::authorize(&data, &headers)?;
    Ok(Json(profile_of(user)))
}

pub async fn update_me(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ProfileUpdateRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    let mut data = state.data.lock().await;
    let user_id = auth::authorize(&data, &headers)?.id;

    let email = payload.email.as_deref().map(auth::normalize_email);
    if let Some(email) = &email {
        if let Some(existing) = data.user_by_email(email) {
            if existing.id != user_id {
                return Err(AppError::bad_request("Email already registered"));
            }
        }
    }

    let user = data
        .user_mut(user_id)
        .ok_or_else(|| AppError::not_found("User not found"))?;
    if let Some(name) = payload.name {
        user.name = name;
    }
    if let Some(email) = email {
        user.email = email;
    }
    if let Some(bio) = payload.bio {
        user.bio = bio;
    }
    if let Some(avatar_url) = payload.avatar_url {
        user.avatar_url = avatar_url;
    }
    let profile = profile_of(user);

    persist_data(&state.data_path, &data).await?;
    Ok(Json(profile))
}

pub async fn change_my_password(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<OwnPasswordRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    let mut data = state.data.lock().await;
    let user = auth::authorize(&data, &headers)?;
    let user_id = user.id;

    if user.status != UserStatus::PendingReset && payload.current_password.is_none() {
        return Err(AppError::bad_request("Current password is required"));
    }
    if let Some(current) = &payload.current_password {
        if !auth::verify_password(current, user) {
            return Err(AppError::bad_request("Current password is incorrect"));
        }
    }
    if payload.new_password.len() < 8 {
        return Err(AppError::bad_request("Password must be at least 8 characters"));
    }

    let user = data
        .user_mut(user_id)
        .ok_or_else(|| AppError::not_found("User not found"))?;
    user.salt = auth::new_salt();
    user.password_hash = auth::hash_password(&payload.new_password, &user.salt);
    if user.status == UserStatus::PendingReset {
        user.status = UserStatus::Active;
    }

    persist_data(&state.data_path, &data).await?;
    Ok(Json(StatusResponse::ok()))
}

// --- habits ---

pub async fn list_habits(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<MonthQuery>,
) -> Result<Json<HabitsResponse>, AppError> {
    let data = state.data.lock().await;
    let user_id = auth::authorize(&data, &headers)?.id;

    let today = state.today();
    let month_first = resolve_month(query.month.as_ref(), today)?;
    let key = month::month_key(month_first);
    let is_current = month::is_current_month(month_first, today);
    let day_count = month::days_in_month(month_first);
    let habits = month_habits(&data, user_id, &key, is_current);
    let habit_matrix = stats::month_matrix(&habits, &key, day_count);

    Ok(Json(HabitsResponse {
        habits: habits.iter().map(|habit| habit.name.clone()).collect(),
        habit_matrix,
        days: day_count,
        month: key,
        available_months: month::available_months(habit_month_keys(&data, user_id), today),
    }))
}

pub async fn add_habit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<AddHabitRequest>,
) -> Result<Json<AddHabitResponse>, AppError> {
    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::bad_request("Habit name is required"));
    }

    let mut data = state.data.lock().await;
    let user_id = auth::authorize(&data, &headers)?.id;

    let today = state.today();
    let id = data.alloc_habit_id();
    let mut months = std::collections::BTreeMap::new();
    months.insert(month::month_key(today), vec![false; MONTH_SLOTS]);
    data.habits.push(HabitRecord {
        id,
        user_id,
        name,
        active: true,
        months,
    });
    persist_data(&state.data_path, &data).await?;

    let habit_matrix = current_matrix(&data, user_id, today);
    let habit = habit_matrix.iter().find(|row| row.id == id).cloned();
    Ok(Json(AddHabitResponse { habit_matrix, habit }))
}

pub async fn toggle_habit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(habit_id): Path<i64>,
    Json(payload): Json<ToggleRequest>,
) -> Result<Json<MatrixResponse>, AppError> {
    let mut data = state.data.lock().await;
    let user_id = auth::authorize(&data, &headers)?.id;

    let today = state.today();
    let month_first = resolve_month(payload.month.as_ref(), today)?;
    if !month::is_current_month(month_first, today) {
        return Err(AppError::bad_request("Only the current month can be edited"));
    }
    let key = month::month_key(month_first);
    let day_count = month::days_in_month(month_first);
    if payload.day_index >= day_count {
        return Err(AppError::bad_request("Invalid day index"));
    }

    let habit = data
        .habits
        .iter_mut()
        .find(|habit| habit.id == habit_id && habit.user_id == user_id && habit.active)
        .ok_or_else(|| AppError::not_found("Habit not found"))?;
    let bits = habit
        .months
        .entry(key)
        .or_insert_with(|| vec![false; MONTH_SLOTS]);
    bits.resize(MONTH_SLOTS, false);
    bits[payload.day_index] = payload.done.unwrap_or(!bits[payload.day_index]);

    persist_data(&state.data_path, &data).await?;
    Ok(Json(MatrixResponse {
        habit_matrix: current_matrix(&data, user_id, today),
    }))
}

pub async fn delete_habit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(habit_id): Path<i64>,
) -> Result<Json<StatusResponse>, AppError> {
    let mut data = state.data.lock().await;
    let user_id = auth::authorize(&data, &headers)?.id;

    let habit = data
        .habits
        .iter_mut()
        .find(|habit| habit.id == habit_id && habit.user_id == user_id && habit.active)
        .ok_or_else(|| AppError::not_found("Habit not found"))?;
    habit.active = false;

    persist_data(&state.data_path, &data).await?;
    Ok(Json(StatusResponse::ok()))
}

// --- sleep ---

pub async fn list_sleep(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<MonthQuery>,
) -> Result<Json<SleepResponse>, AppError> {
    let data = state.data.lock().await;
    let user_id = auth::authorize(&data, &headers)?.id;

    let today = state.today();
    let month_first = resolve_month(query.month.as_ref(), today)?;
    Ok(Json(build_sleep(&data, user_id, month_first, today)))
}

pub async fn log_sleep(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<SleepLogRequest>,
) -> Result<Json<SleepResponse>, AppError> {
    if !(0.0..=24.0).contains(&payload.hours) || !payload.hours.is_finite() {
        return Err(AppError::bad_request("Invalid hours"));
    }

    let mut data = state.data.lock().await;
    let user_id = auth::authorize(&data, &headers)?.id;

    // Upsert by date: a second log for the same night overwrites the first.
    match data
        .sleep
        .iter()
        .position(|entry| entry.user_id == user_id && entry.date == payload.date)
    {
        Some(index) => data.sleep[index].hours = payload.hours,
        None => {
            let id = data.alloc_sleep_id();
            data.sleep.push(SleepRecord {
                id,
                user_id,
                date: payload.date,
                hours: payload.hours,
            });
        }
    }
    persist_data(&state.data_path, &data).await?;

    let month_first = month::month_start(payload.date);
    Ok(Json(build_sleep(&data, user_id, month_first, state.today())))
}

pub async fn delete_sleep(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(entry_id): Path<i64>,
) -> Result<Json<StatusResponse>, AppError> {
    let mut data = state.data.lock().await;
    let user_id = auth::authorize(&data, &headers)?.id;

    let index = data
        .sleep
        .iter()
        .position(|entry| entry.id == entry_id && entry.user_id == user_id)
        .ok_or_else(|| AppError::not_found("Sleep entry not found"))?;
    data.sleep.remove(index);

    persist_data(&state.data_path, &data).await?;
    Ok(Json(StatusResponse::ok()))
}

// --- dashboard ---

pub async fn dashboard(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardResponse>, AppError> {
    let data = state.data.lock().await;
    let user = auth::authorize(&data, &headers)?;

    let mut target_id = user.id;
    if let Some(requested) = query.user_id {
        if user.role == Role::Admin {
            data.user(requested)
                .ok_or_else(|| AppError::not_found("User not found"))?;
            target_id = requested;
        }
    }

    let today = state.today();
    let month_first = resolve_month(query.month.as_ref(), today)?;
    Ok(Json(build_dashboard(&data, target_id, month_first, today)))
}

// --- admin: users ---

pub async fn list_users(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<UsersQuery>,
) -> Result<Json<UsersPageResponse>, AppError> {
    let data = state.data.lock().await;
    let user = auth::authorize(&data, &headers)?;
    auth::require_admin(user)?;

    let all = summaries(&data);
    let matched = paging::filter_users(&all, query.query.as_deref().unwrap_or(""));
    let page = paging::paginate(matched.len(), query.page.unwrap_or(1));
    let users: Vec<UserSummary> = matched[page.start..page.end]
        .iter()
        .map(|&index| all[index].clone())
        .collect();

    Ok(Json(UsersPageResponse {
        users,
        total: matched.len(),
        page: page.page,
        total_pages: page.total_pages,
    }))
}

pub async fn create_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateUserRequest>,
) -> Result<Json<CreateUserResponse>, AppError> {
    let mut data = state.data.lock().await;
    let user = auth::authorize(&data, &headers)?;
    auth::require_admin(user)?;

    let name = payload.name.trim().to_string();
    let email = auth::normalize_email(&payload.email);
    if name.is_empty() {
        return Err(AppError::bad_request("Name is required"));
    }
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::bad_request("Invalid email"));
    }
    if data.user_by_email(&email).is_some() {
        return Err(AppError::bad_request("Email already registered"));
    }

    let salt = auth::new_salt();
    // Without a password the account waits in pending_reset behind an
    // unguessable placeholder until an admin sets one.
    let (password, status) = match payload.password {
        Some(password) => (password, UserStatus::Active),
        None => (auth::new_token(), UserStatus::PendingReset),
    };
    let id = data.alloc_user_id();
    data.users.push(UserRecord {
        id,
        name,
        email,
        password_hash: auth::hash_password(&password, &salt),
        salt,
        role: Role::User,
        status,
        bio: String::new(),
        avatar_url: String::new(),
        joined: state.today(),
    });
    persist_data(&state.data_path, &data).await?;

    let created = data.user(id).map(|user| summarize(&data, user));
    let users = summaries(&data);
    let total = users.len();
    Ok(Json(CreateUserResponse {
        user: created.ok_or_else(|| AppError::not_found("User not found"))?,
        users,
        total,
    }))
}

pub async fn update_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<i64>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<UserListResponse>, AppError> {
    let mut data = state.data.lock().await;
    let user = auth::authorize(&data, &headers)?;
    auth::require_admin(user)?;

    let email = payload.email.as_deref().map(auth::normalize_email);
    let target = data
        .user_mut(user_id)
        .ok_or_else(|| AppError::not_found("User not found"))?;
    if let Some(name) = payload.name {
        target.name = name;
    }
    if let Some(email) = email {
        target.email = email;
    }
    if let Some(status) = payload.status {
        target.status = status;
    }
    persist_data(&state.data_path, &data).await?;

    let users = summaries(&data);
    let total = users.len();
    Ok(Json(UserListResponse { users, total }))
}

pub async fn reset_password(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<i64>,
    Json(payload): Json<PasswordResetRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    let mut data = state.data.lock().await;
    let user = auth::authorize(&data, &headers)?;
    auth::require_admin(user)?;

    if payload.password.len() < 8 {
        return Err(AppError::bad_request("Password must be at least 8 characters"));
    }
    let target = data
        .user_mut(user_id)
        .ok_or_else(|| AppError::not_found("User not found"))?;
    target.salt = auth::new_salt();
    target.password_hash = auth::hash_password(&payload.password, &target.salt);

    persist_data(&state.data_path, &data).await?;
    Ok(Json(StatusResponse::ok()))
}

// --- admin: reporting ---

pub async fn admin_stats(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<AdminStats>, AppError> {
    let data = state.data.lock().await;
    let user = auth::authorize(&data, &headers)?;
    auth::require_admin(user)?;

    let report = community_report(&data, state.today());
    let active_users = data
        .users
        .iter()
        .filter(|user| user.status == UserStatus::Active)
        .count();
    Ok(Json(AdminStats {
        overall_success_rate: report.success_rate,
        success_trend: report.success_trend,
        total_habits: report.total_habits,
        active_users,
    }))
}

pub async fn admin_report(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<AdminReport>, AppError> {
    let data = state.data.lock().await;
    let user = auth::authorize(&data, &headers)?;
    auth::require_admin(user)?;

    Ok(Json(community_report(&data, state.today())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn fixture() -> AppData {
        let mut data = AppData::default();
        let joined = "2024-05-01".parse().unwrap();
        data.users.push(UserRecord {
            id: 1,
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password_hash: String::new(),
            salt: String::new(),
            role: Role::User,
            status: UserStatus::Active,
            bio: String::new(),
            avatar_url: String::new(),
            joined,
        });

        let mut june = vec![false; MONTH_SLOTS];
        june[0] = true;
        june[1] = true;
        june[2] = true;
        let mut months = BTreeMap::new();
        months.insert("2024-06".to_string(), june);
        data.habits.push(HabitRecord {
            id: 1,
            user_id: 1,
            name: "Read".to_string(),
            active: true,
            months: months.clone(),
        });
        let mut write = months;
        write.get_mut("2024-06").unwrap()[2] = false;
        data.habits.push(HabitRecord {
            id: 2,
            user_id: 1,
            name: "Write".to_string(),
            active: true,
            months: write,
        });

        data.sleep.push(SleepRecord {
            id: 1,
            user_id: 1,
            date: "2024-06-01".parse().unwrap(),
            hours: 6.0,
        });
        data.sleep.push(SleepRecord {
            id: 2,
            user_id: 1,
            date: "2024-06-03".parse().unwrap(),
            hours: 8.0,
        });
        data
    }

    #[test]
    fn dashboard_counts_only_days_up_to_today() {
        let data = fixture();
        let today = "2024-06-03".parse().unwrap();
        let month_first = "2024-06-01".parse().unwrap();
        let dashboard = build_dashboard(&data, 1, month_first, today);

        // Both habits done on days 1-2, only Read on day 3: 5 of 6 slots.
        assert_eq!(dashboard.daily_counts[..3], [2, 2, 1]);
        assert_eq!(dashboard.success_rate, 83);
        assert_eq!(dashboard.stats.completed_habits, 1);
        assert_eq!(dashboard.stats.total_habits, 2);
        // Day 3 sits at 1 of 2 habits, under the streak target.
        assert_eq!(dashboard.stats.streak_days, 0);
        assert_eq!(dashboard.band.good, 83);
        assert_eq!(
            dashboard.band.good + dashboard.band.on_track + dashboard.band.needs_focus,
            100
        );
        assert_eq!(dashboard.top_habits[0].name, "Read");
        assert_eq!(dashboard.top_habits[0].total, 3);
        assert_eq!(dashboard.month, "2024-06");
        assert_eq!(dashboard.available_months[0], "2024-06");
    }

    #[test]
    fn dashboard_for_a_past_month_uses_the_whole_month() {
        let data = fixture();
        let today = "2024-07-15".parse().unwrap();
        let month_first = "2024-06-01".parse().unwrap();
        let dashboard = build_dashboard(&data, 1, month_first, today);

        // 5 completions over 2 habits * 30 days.
        assert_eq!(dashboard.success_rate, 8);
        assert_eq!(dashboard.daily_counts.len(), 30);
        // Day 30 is the reference day for "completed today" in a closed month.
        assert_eq!(dashboard.stats.completed_habits, 0);
    }

    #[test]
    fn sleep_view_matches_logged_nights() {
        let data = fixture();
        let today = "2024-06-03".parse().unwrap();
        let month_first = "2024-06-01".parse().unwrap();
        let sleep = build_sleep(&data, 1, month_first, today);

        assert_eq!(sleep.days, 30);
        assert_eq!(sleep.daily_hours[0], Some(6.0));
        assert_eq!(sleep.daily_hours[1], None);
        assert_eq!(sleep.daily_hours[2], Some(8.0));
        assert_eq!(sleep.rolling_average[2], Some(7.0));
        assert_eq!(sleep.total_entries, 2);
        assert_eq!(sleep.average_hours, 7.0);
        assert_eq!(sleep.best_sleep, 8.0);
        assert!(sleep.editable);
        assert_eq!(sleep.entries.len(), 2);

        // The same month viewed later is read-only.
        let later = build_sleep(&data, 1, month_first, "2024-07-15".parse().unwrap());
        assert!(!later.editable);
    }

    #[test]
    fn community_report_spans_the_trailing_window() {
        let data = fixture();
        let today = "2024-06-05".parse().unwrap();
        let report = community_report(&data, today);

        assert_eq!(report.total_users, 1);
        assert_eq!(report.total_habits, 2);
        assert_eq!(report.total_completed, 5);
        assert_eq!(report.total_slots, 60);
        assert_eq!(report.daily_counts.len(), 30);
        assert_eq!(report.top_habits[0].name, "Read");
        assert_eq!(report.sleep_report.total_entries, 2);
        assert_eq!(report.sleep_report.average_hours, 7.0);
    }
}

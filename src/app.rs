use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{delete, get, post},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/health", get(handlers::health))
        .route("/api/auth/signup", post(handlers::signup))
        .route("/api/auth/login", post(handlers::login))
        .route("/api/auth/logout", post(handlers::logout))
        .route("/api/users/me", get(handlers::get_me).post(handlers::update_me))
        .route("/api/users/me/password", post(handlers::change_my_password))
        .route("/api/users", get(handlers::list_users).post(handlers::create_user))
        .route("/api/users/:id", post(handlers::update_user))
        .route("/api/users/:id/password", post(handlers::reset_password))
        .route("/api/habits", get(handlers::list_habits).post(handlers::add_habit))
        .route("/api/habits/:id/toggle", post(handlers::toggle_habit))
        .route("/api/habits/:id", delete(handlers::delete_habit))
        .route("/api/sleep", get(handlers::list_sleep).post(handlers::log_sleep))
        .route("/api/sleep/:id", delete(handlers::delete_sleep))
        .route("/api/dashboard", get(handlers::dashboard))
        .route("/api/admin/stats", get(handlers::admin_stats))
        .route("/api/admin/report", get(handlers::admin_report))
        .with_state(state)
}

use crate::models::AppData;
use chrono::{Local, NaiveDate};
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

/// Shared application state. The clock is injected so month-gating logic can
/// be exercised without depending on the wall clock.
#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub data: Arc<Mutex<AppData>>,
    today: fn() -> NaiveDate,
}

impl AppState {
    pub fn new(data_path: PathBuf, data: AppData) -> Self {
        Self {
            data_path,
            data: Arc::new(Mutex::new(data)),
            today: || Local::now().date_naive(),
        }
    }

    pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn today(&self) -> NaiveDate {
        (self.today)()
    }
}

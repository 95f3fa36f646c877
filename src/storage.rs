use crate::errors::AppError;
use crate::models::AppData;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::{debug, error};

pub fn resolve_data_path() -> Result<PathBuf, std::io::Error> {
    if let Ok(path) = env::var("APP_DATA_PATH") {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from("data/habitat.json"))
}

/// A missing or unreadable data file starts the app empty rather than failing.
pub async fn load_data(path: &Path) -> AppData {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice::<AppData>(&bytes) {
            Ok(data) => {
                debug!(
                    "loaded {} users, {} habits, {} sleep entries",
                    data.users.len(),
                    data.habits.len(),
                    data.sleep.len()
                );
                data
            }
            Err(err) => {
                error!("failed to parse data file: {err}");
                AppData::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => AppData::default(),
        Err(err) => {
            error!("failed to read data file: {err}");
            AppData::default()
        }
    }
}

/// Write-then-rename so the data file stays intact if the process dies mid-write.
pub async fn persist_data(path: &Path, data: &AppData) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(data).map_err(AppError::internal)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, payload).await.map_err(AppError::internal)?;
    fs::rename(&tmp, path).await.map_err(AppError::internal)?;
    Ok(())
}

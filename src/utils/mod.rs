use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Once;

use once_cell::sync::Lazy;

use crate::errors::AvailabilityError;

static TRACING_INIT: Once = Once::new();

static BASE_DIR: Lazy<PathBuf> = Lazy::new(|| {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("coaster")
});

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("availability_core=info".parse().unwrap());

        fmt().with_env_filter(filter).init();
    });
}

/// Base directory for persisted CLI state (config, dry-run journals).
pub fn base_dir() -> PathBuf {
    BASE_DIR.clone()
}

pub fn ensure_dir(path: &Path) -> Result<(), AvailabilityError> {
    fs::create_dir_all(path)?;
    Ok(())
}

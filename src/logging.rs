use eyre::{Result, WrapErr, eyre};
use log::LevelFilter;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

const APP_NAME: &str = "scanui";

/// Initialize logging to a system-specific log file. The TUI owns the terminal,
/// so nothing is ever logged to stdout or stderr.
pub fn init_logging() -> Result<PathBuf> {
    let log_path = get_log_file_path()?;

    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)
            .wrap_err_with(|| format!("Failed to create log directory {}", parent.display()))?;
    }

    let log_level = parse_level(std::env::var("RUST_LOG").ok().as_deref());

    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .wrap_err_with(|| format!("Failed to open log file {}", log_path.display()))?;

    env_logger::Builder::new()
        .filter_level(log_level)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {} - {}",
                chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .wrap_err("Logger already initialized")?;

    log::info!("Logging initialized to: {}", log_path.display());
    log::info!("Log level: {}", log_level);

    Ok(log_path)
}

/// `RUST_LOG` as a single level, defaulting to info
fn parse_level(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|v| v.trim().parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info)
}

/// Get the system-specific log file path
pub fn get_log_file_path() -> Result<PathBuf> {
    let log_dir = if cfg!(target_os = "macos") {
        // macOS: ~/Library/Logs/scanui/
        dirs::home_dir()
            .ok_or_else(|| eyre!("Could not find home directory"))?
            .join("Library")
            .join("Logs")
            .join(APP_NAME)
    } else {
        // Linux and others: ~/.local/share/scanui/logs/
        dirs::data_local_dir()
            .ok_or_else(|| eyre!("Could not find local data directory"))?
            .join(APP_NAME)
            .join("logs")
    };

    Ok(log_dir.join(format!("{}.log", APP_NAME)))
}

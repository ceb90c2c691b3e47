//! File logging.
//!
//! The terminal belongs to the TUI, so log records go to a file instead of
//! stderr. Panics are routed through the logger as well.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;

use crate::config::{LogLevel, LogSettings};

/// Install the global logger. Returns the log file in use, or `None` when
/// logging is turned off or no location could be determined.
pub fn init(settings: &LogSettings) -> io::Result<Option<PathBuf>> {
    if settings.level == LogLevel::Off {
        return Ok(None);
    }
    let Some(path) = settings.resolved_path() else {
        return Ok(None);
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let mut clog = colog::default_builder();
    clog.filter(None, settings.level.into());
    clog.write_style(env_logger::WriteStyle::Never);
    clog.target(env_logger::Target::Pipe(Box::new(file)));
    clog.try_init().map_err(io::Error::other)?;

    std::panic::set_hook(Box::new(|panic_info| {
        let current_thread = std::thread::current();
        let thread_name = current_thread.name().unwrap_or("unnamed");
        log::error!("panic in thread '{}': {}", thread_name, panic_info);
    }));

    Ok(Some(path))
}

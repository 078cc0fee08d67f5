//! Log sink setup.
//!
//! Inside a GitHub Actions runner, records are written to stdout as workflow
//! commands so warnings and errors show up as annotations. Elsewhere they are
//! plain `[LEVEL] message` lines.

use std::io::Write;

use log::{Level, LevelFilter};

/// Whether the configured `log_level` may still change the active level.
#[derive(Debug, Clone, Copy)]
pub struct LogLevelControl {
    adjustable: bool,
}

impl LogLevelControl {
    /// Apply the `log_level` from config. `--verbose` and `RUST_LOG` win over it.
    ///
    /// Config can quiet info and debug output but never warnings or errors.
    pub fn apply_config_level(&self, level: Option<&str>) {
        if !self.adjustable {
            return;
        }
        let Some(level) = level else {
            return;
        };
        match level.parse::<LevelFilter>() {
            Ok(filter) => log::set_max_level(config_level_floor(filter)),
            Err(_) => log::warn!("Ignoring unknown log_level {:?}", level),
        }
    }
}

/// Initialize env_logger.
///
/// Precedence: `verbose` (debug), then `RUST_LOG`, then the config level
/// applied later through the returned control, then info.
pub fn setup_logging(verbose: bool) -> LogLevelControl {
    let annotations = std::env::var("GITHUB_ACTIONS").is_ok_and(|value| value == "true");
    let from_env = std::env::var_os("RUST_LOG").is_some();

    let mut builder = env_logger::Builder::new();
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    } else if from_env {
        builder.parse_default_env();
    } else {
        // The global max level gates records until config is known
        builder.filter_level(LevelFilter::Trace);
    }

    builder
        .target(env_logger::Target::Stdout)
        .format(move |buf, record| {
            writeln!(buf, "{}", render_line(record.level(), &record.args().to_string(), annotations))
        })
        .init();

    let adjustable = !verbose && !from_env;
    if adjustable {
        log::set_max_level(LevelFilter::Info);
    }
    LogLevelControl { adjustable }
}

/// Per-item close failures are warnings, so config never filters below warn.
pub fn config_level_floor(filter: LevelFilter) -> LevelFilter {
    filter.max(LevelFilter::Warn)
}

/// Emit the final failure line, bypassing the level filter when it would hide it.
pub fn report_fatal(message: &str) {
    if log::log_enabled!(Level::Error) {
        log::error!("{}", message);
    } else {
        let annotations = std::env::var("GITHUB_ACTIONS").is_ok_and(|value| value == "true");
        eprintln!("{}", render_line(Level::Error, message, annotations));
    }
}

/// Format one log record.
pub fn render_line(level: Level, message: &str, annotations: bool) -> String {
    if !annotations {
        return format!("[{}] {}", level, message);
    }
    match level {
        Level::Error => format!("::error::{}", escape_data(message)),
        Level::Warn => format!("::warning::{}", escape_data(message)),
        Level::Info => message.to_string(),
        Level::Debug | Level::Trace => format!("::debug::{}", escape_data(message)),
    }
}

/// Escape a workflow command payload.
pub fn escape_data(message: &str) -> String {
    message.replace('%', "%25").replace('\r', "%0D").replace('\n', "%0A")
}

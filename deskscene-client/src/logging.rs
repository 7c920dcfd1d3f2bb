//! Log output for the viewer: timestamped lines on stderr.

use log::LevelFilter;

/// Installs the global logger. `level` is one of `off`, `error`, `warn`, `info`, `debug` or
/// `trace`; anything else falls back to `info`.
pub fn init(level: &str) -> Result<(), log::SetLoggerError> {
    let level = level.parse().unwrap_or(LevelFilter::Info);
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} {:<5} {}: {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()
}

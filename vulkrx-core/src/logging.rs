use log::LevelFilter;
use std::io::Write;

pub use env_logger::Target;

/// Installs the process logger. Later calls only adjust the max level.
pub fn init_logger(level: LevelFilter, target: Target) {
    let mut builder = env_logger::Builder::new();
    builder
        .format(move |buf, record| {
            writeln!(
                buf,
                "{}: {} - {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .target(target)
        .filter_level(level);

    let _ = builder.try_init();

    log::set_max_level(level);
}

pub fn parse_level(level: &str) -> Option<LevelFilter> {
    let lvl = match level.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" | "warning" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => return None,
    };
    Some(lvl)
}

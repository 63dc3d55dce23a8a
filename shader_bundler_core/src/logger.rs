use ansi_term::Colour;
use chrono::Local;
use err_derive::Error;
use log::{error, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::{fmt::Display, process};

#[derive(Debug, Error)]
pub enum LoggerInitError {
    #[error(display = "Failed to set logger: {}", err)]
    SetLogger { err: SetLoggerError },
}

/// Timestamped, optionally colored logger writing to stderr.
#[derive(Debug)]
pub struct Logger {
    color: bool,
    level: LevelFilter,
}

impl Logger {
    pub fn new(color: bool, level: LevelFilter) -> Self {
        Logger { color, level }
    }

    /// Installs the logger globally. Fails if a logger is already set.
    pub fn init(color: bool, level: LevelFilter) -> Result<(), LoggerInitError> {
        log::set_boxed_logger(Box::new(Logger::new(color, level)))
            .map_err(|err| LoggerInitError::SetLogger { err })?;
        log::set_max_level(level);

        Ok(())
    }

    fn line(&self, level: Level, time: impl Display, message: impl Display) -> String {
        let tag = format!("{:<5}", level);
        let tag = if self.color {
            level_colour(level).bold().paint(tag).to_string()
        } else {
            tag
        };

        format!("[{} {}] {}", time, tag, message)
    }
}

fn level_colour(level: Level) -> Colour {
    match level {
        Level::Error => Colour::Red,
        Level::Warn => Colour::Yellow,
        Level::Info => Colour::Green,
        Level::Debug => Colour::Blue,
        Level::Trace => Colour::Purple,
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let time = Local::now().format("%H:%M:%S");
            eprintln!("{}", self.line(record.level(), time, record.args()));
        }
    }

    fn flush(&self) {}
}

pub trait UnwrapOrLog<T> {
    /// Unwraps, or logs `<context>: <error>` and exits with status 1.
    fn unwrap_or_log(self, context: &str) -> T;
}

impl<T, E: Display> UnwrapOrLog<T> for Result<T, E> {
    fn unwrap_or_log(self, context: &str) -> T {
        match self {
            Ok(val) => val,
            Err(err) => {
                error!("{}: {}", context, err);
                process::exit(1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_line_layout() {
        let logger = Logger::new(false, LevelFilter::Info);
        assert_eq!(
            logger.line(Level::Info, "12:00:00", "Wrote 2 shaders"),
            "[12:00:00 INFO ] Wrote 2 shaders"
        );
        assert_eq!(
            logger.line(Level::Error, "12:00:01", "Bundle: oops"),
            "[12:00:01 ERROR] Bundle: oops"
        );
    }

    #[test]
    fn colored_line_wraps_level_in_escape_codes() {
        let logger = Logger::new(true, LevelFilter::Info);
        let line = logger.line(Level::Warn, "12:00:00", "careful");

        assert!(line.contains("\u{1b}["));
        assert!(line.contains("WARN"));
        assert!(line.ends_with("] careful"));
    }

    #[test]
    fn respects_level_filter() {
        let logger = Logger::new(false, LevelFilter::Info);
        let info = Metadata::builder().level(Level::Info).build();
        let debug = Metadata::builder().level(Level::Debug).build();

        assert!(logger.enabled(&info));
        assert!(!logger.enabled(&debug));
    }

    #[test]
    fn unwrap_or_log_passes_ok_through() {
        let res: Result<u8, String> = Ok(3);
        assert_eq!(res.unwrap_or_log("Test"), 3);
    }
}

//! Leveled diagnostics for the build pipeline.
//!
//! The builder never talks to a global logger directly; it writes to an
//! injected [`BuildLog`] sink. The default sink forwards to the `log`
//! crate, and [`MemoryLog`] captures messages so embedders (and tests)
//! can inspect the warning side channel of a finished build.

/// Severity of one diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

/// Diagnostics sink injected into the build.
///
/// Warnings (missing glyphs, failed renders) are reported here and never
/// turn into build failures.
pub trait BuildLog {
    fn log(&mut self, level: Level, msg: &str);

    fn debug(&mut self, msg: &str) {
        self.log(Level::Debug, msg);
    }

    fn info(&mut self, msg: &str) {
        self.log(Level::Info, msg);
    }

    fn warn(&mut self, msg: &str) {
        self.log(Level::Warn, msg);
    }

    fn error(&mut self, msg: &str) {
        self.log(Level::Error, msg);
    }

    fn fatal(&mut self, msg: &str) {
        self.log(Level::Fatal, msg);
    }
}

/// Default sink: forwards every message to the `log` crate macros.
///
/// `Fatal` has no `log` counterpart and maps to `error!` with a prefix.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogFacade;

impl BuildLog for LogFacade {
    fn log(&mut self, level: Level, msg: &str) {
        match level {
            Level::Debug => log::debug!("{msg}"),
            Level::Info => log::info!("{msg}"),
            Level::Warn => log::warn!("{msg}"),
            Level::Error => log::error!("{msg}"),
            Level::Fatal => log::error!("fatal: {msg}"),
        }
    }
}

/// Recording sink that keeps every message in memory.
#[derive(Debug, Default)]
pub struct MemoryLog {
    pub entries: Vec<(Level, String)>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages at or above `level`, in arrival order.
    pub fn at_least(&self, level: Level) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(move |(l, _)| *l >= level)
            .map(|(_, msg)| msg.as_str())
    }
}

impl BuildLog for MemoryLog {
    fn log(&mut self, level: Level, msg: &str) {
        self.entries.push((level, msg.to_owned()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_order_by_severity() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Warn);
        assert!(Level::Warn < Level::Error);
        assert!(Level::Error < Level::Fatal);
    }

    #[test]
    fn memory_log_records_in_order() {
        let mut log = MemoryLog::new();
        log.debug("first");
        log.warn("second");
        log.fatal("third");
        assert_eq!(log.entries.len(), 3);
        assert_eq!(log.entries[0], (Level::Debug, "first".to_owned()));
        assert_eq!(log.entries[2], (Level::Fatal, "third".to_owned()));
    }

    #[test]
    fn at_least_filters_by_severity() {
        let mut log = MemoryLog::new();
        log.debug("noise");
        log.warn("missing glyph");
        log.error("bad page");
        let warnings: Vec<&str> = log.at_least(Level::Warn).collect();
        assert_eq!(warnings, vec!["missing glyph", "bad page"]);
    }
}

use log::{LevelFilter, Metadata, Record, SetLoggerError};

static LOGGER: Logger = Logger;

/// Print log records to stdout.
pub struct Logger;
impl Logger {
    pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_logger(&LOGGER)?;
        log::set_max_level(level);
        Ok(())
    }
}
impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        println!(
            "{} {} {}:{} {}",
            chrono::Utc::now().format("%H:%M:%S%.3f"),
            record.level(),
            record.file().unwrap_or("*unknown file*"),
            record.line().unwrap_or_default(),
            record.args()
        );
    }

    fn flush(&self) {}
}

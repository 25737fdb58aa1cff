//! Browser console plumbing: a `log` backend and a panic hook.
//!
//! Off wasm32 `install` does nothing, so the bridge can be unit-tested
//! natively.

#[cfg(target_arch = "wasm32")]
mod imp {
    use log::{Level, LevelFilter, Log, Metadata, Record};
    use std::sync::Once;

    struct ConsoleLogger;

    static LOGGER: ConsoleLogger = ConsoleLogger;

    impl Log for ConsoleLogger {
        fn enabled(&self, metadata: &Metadata) -> bool {
            metadata.level() <= log::max_level()
        }

        fn log(&self, record: &Record) {
            if !self.enabled(record.metadata()) {
                return;
            }
            let msg = format!("[{}] {}", record.target(), record.args()).into();
            match record.level() {
                Level::Error => web_sys::console::error_1(&msg),
                Level::Warn => web_sys::console::warn_1(&msg),
                Level::Info => web_sys::console::info_1(&msg),
                Level::Debug | Level::Trace => web_sys::console::debug_1(&msg),
            }
        }

        fn flush(&self) {}
    }

    pub fn install() {
        static INSTALL: Once = Once::new();
        INSTALL.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("GD WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
            // Another logger may already be set by the host bundle.
            if log::set_logger(&LOGGER).is_ok() {
                log::set_max_level(if cfg!(debug_assertions) {
                    LevelFilter::Debug
                } else {
                    LevelFilter::Warn
                });
            }
        });
    }
}

/// Install the console logger and panic hook. Safe to call repeatedly.
pub fn install() {
    #[cfg(target_arch = "wasm32")]
    imp::install();
}

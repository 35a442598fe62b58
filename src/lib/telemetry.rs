//! Logging setup. Everything logs through `tracing`; in the browser events go
//! to the developer console, on the host they go to stderr. Never log tokens.

use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVE: &str = "info";

/// Installs the global subscriber. Calling it twice is harmless.
pub fn init(level: &str) {
    let filter = EnvFilter::try_new(filter_directive(level))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    #[cfg(target_arch = "wasm32")]
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(console::ConsoleMakeWriter)
        .with_ansi(false)
        .without_time();

    #[cfg(not(target_arch = "wasm32"))]
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let _ = subscriber.try_init();
}

/// Normalizes a configured level into an `EnvFilter` directive.
fn filter_directive(level: &str) -> String {
    let level = level.trim().to_lowercase();
    match level.as_str() {
        "" => DEFAULT_DIRECTIVE.to_string(),
        "0" => "error".to_string(),
        "1" => "warn".to_string(),
        "2" => "info".to_string(),
        "3" => "debug".to_string(),
        "4" | "5" => "trace".to_string(),
        _ => level,
    }
}

#[cfg(target_arch = "wasm32")]
mod console {
    use std::io::{self, Write};
    use tracing::{Level, Metadata};
    use tracing_subscriber::fmt::MakeWriter;
    use wasm_bindgen::JsValue;

    /// Routes formatted events to `console.error`/`warn`/`log` by level.
    pub struct ConsoleMakeWriter;

    pub struct ConsoleWriter {
        level: Level,
        buffer: Vec<u8>,
    }

    impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
        type Writer = ConsoleWriter;

        fn make_writer(&'a self) -> Self::Writer {
            ConsoleWriter {
                level: Level::INFO,
                buffer: Vec::new(),
            }
        }

        fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
            ConsoleWriter {
                level: *meta.level(),
                buffer: Vec::new(),
            }
        }
    }

    impl Write for ConsoleWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.buffer.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Drop for ConsoleWriter {
        fn drop(&mut self) {
            if self.buffer.is_empty() {
                return;
            }
            let line = String::from_utf8_lossy(&self.buffer);
            let message = JsValue::from_str(line.trim_end());
            match self.level {
                Level::ERROR => web_sys::console::error_1(&message),
                Level::WARN => web_sys::console::warn_1(&message),
                Level::DEBUG | Level::TRACE => web_sys::console::debug_1(&message),
                Level::INFO => web_sys::console::log_1(&message),
            }
        }
    }
}

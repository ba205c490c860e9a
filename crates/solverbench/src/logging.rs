//! Log output for benchmark runs.
//!
//! Provides a `tracing` layer that prefixes every event with the name of the
//! sub-single benchmark bound in the [diagnostic context](crate::diagnostic)
//! of the emitting thread, so interleaved output stays attributable.
//!
//! ## Log Levels
//!
//! - **INFO**: Benchmark and run lifecycle (start/end)
//! - **WARN**: Failed warm-ups, statistics that failed to close, diverging scales
//! - **ERROR**: Failed measured runs
//! - **DEBUG**: Memory baselines, discarded solutions

use std::fmt::Write as _;
use std::io::{self, Write};
use std::sync::OnceLock;

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::diagnostic::{self, SUB_SINGLE_BENCHMARK_NAME_KEY};

static INIT: OnceLock<()> = OnceLock::new();

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "solverbench=info";

/// Installs the benchmark log output as the global subscriber.
///
/// Safe to call multiple times - only the first call has effect. Does nothing
/// if another global subscriber is already installed.
pub fn init() {
    INIT.get_or_init(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(BenchmarkLogLayer::new())
            .try_init();
    });
}

/// Layer writing one line per event, prefixed with the running sub-single.
///
/// Writes to stderr unless another writer is supplied.
#[derive(Debug, Clone)]
pub struct BenchmarkLogLayer<W = fn() -> io::Stderr> {
    make_writer: W,
}

impl BenchmarkLogLayer {
    pub fn new() -> Self {
        Self {
            make_writer: io::stderr,
        }
    }
}

impl Default for BenchmarkLogLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> BenchmarkLogLayer<W> {
    /// Replaces the output.
    pub fn with_writer<W2>(self, make_writer: W2) -> BenchmarkLogLayer<W2>
    where
        W2: for<'w> MakeWriter<'w> + 'static,
    {
        BenchmarkLogLayer { make_writer }
    }
}

impl<S, W> Layer<S> for BenchmarkLogLayer<W>
where
    S: Subscriber,
    W: for<'w> MakeWriter<'w> + 'static,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let sub_single = diagnostic::get(SUB_SINGLE_BENCHMARK_NAME_KEY);
        let line = format_line(
            *metadata.level(),
            metadata.target(),
            sub_single.as_deref(),
            &visitor,
        );
        let _ = writeln!(self.make_writer.make_writer(), "{}", line);
    }
}

#[derive(Default)]
struct EventVisitor {
    message: Option<String>,
    event: Option<String>,
    fields: Vec<(&'static str, String)>,
}

impl EventVisitor {
    fn record(&mut self, field: &Field, value: String) {
        match field.name() {
            "message" => self.message = Some(value),
            "event" => self.event = Some(value),
            name => self.fields.push((name, value)),
        }
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.record(field, format!("{:?}", value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.record(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.record(field, value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record(field, value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.record(field, value.to_string());
    }
}

fn format_line(level: Level, target: &str, sub_single: Option<&str>, v: &EventVisitor) -> String {
    let mut line = format!(
        "{:>5} [{}] {}:",
        level.as_str(),
        sub_single.unwrap_or("-"),
        target
    );
    if let Some(event) = &v.event {
        let _ = write!(line, " {}", event);
    }
    if let Some(message) = &v.message {
        let _ = write!(line, " {}", message);
    }
    for (name, value) in &v.fields {
        let _ = write!(line, " {}={}", name, value);
    }
    line
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use tracing::info;

    use super::*;

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Buffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn capture(f: impl FnOnce()) -> String {
        let buffer = Buffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::registry()
            .with(BenchmarkLogLayer::new().with_writer(move || writer.clone()));
        tracing::subscriber::with_default(subscriber, f);
        buffer.contents()
    }

    #[test]
    fn test_prefixes_bound_sub_single_name() {
        let output = capture(|| {
            let _guard = diagnostic::put(SUB_SINGLE_BENCHMARK_NAME_KEY, "queens8_hc_1");
            info!(event = "run_start", index = 1u64, warm_up = false);
        });
        assert_eq!(
            output,
            " INFO [queens8_hc_1] solverbench::logging::tests: run_start index=1 warm_up=false\n"
        );
    }

    #[test]
    fn test_unbound_context_uses_placeholder() {
        let output = capture(|| info!("plain message"));
        assert!(output.starts_with(" INFO [-] "));
        assert!(output.ends_with("plain message\n"));
    }

    #[test]
    fn test_init_is_idempotent() {
        init();
        init();
    }
}

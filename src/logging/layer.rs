//! `tracing` integration
//!
//! Routes events from `tracing` macros through a [`Logger`], so code that logs
//! with `tracing::info!` gets the same lines, tagged with its own file and line.

use std::error::Error;
use std::fmt::{self, Write as _};
use std::sync::Arc;

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;

use super::error::LoggingError;
use super::logger::Logger;
use super::record::{render_error_chain, CallerLocation, Severity};

/// Layer that writes every event to a [`Logger`]
pub struct FacadeLayer {
    logger: Arc<Logger>,
}

impl FacadeLayer {
    pub fn new(logger: Arc<Logger>) -> Self {
        Self { logger }
    }
}

impl<S: Subscriber> Layer<S> for FacadeLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let level = Severity::from(*metadata.level());
        if !self.logger.enabled(level) {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let location = CallerLocation::from_parts(metadata.file(), metadata.line());
        let message = visitor.message();
        self.logger.emit_at(level, location, message, visitor.trace);
    }
}

/// Collects the `message` field, other fields as `key=value`, and any error value
#[derive(Default)]
struct EventVisitor {
    message: String,
    fields: String,
    trace: Option<String>,
}

impl EventVisitor {
    fn message(&self) -> String {
        match (self.message.is_empty(), self.fields.is_empty()) {
            (_, true) => self.message.clone(),
            (true, false) => self.fields.clone(),
            (false, false) => format!("{} {}", self.message, self.fields),
        }
    }

    fn push_field(&mut self, field: &Field, value: fmt::Arguments<'_>) {
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        let _ = write!(self.fields, "{}={}", field.name(), value);
    }
}

impl Visit for EventVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.push_field(field, format_args!("{}", value));
        }
    }

    fn record_error(&mut self, field: &Field, value: &(dyn Error + 'static)) {
        self.push_field(field, format_args!("{}", value));
        self.trace = Some(render_error_chain(value));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            self.push_field(field, format_args!("{:?}", value));
        }
    }
}

/// Install `logger` as the global `tracing` subscriber
///
/// Events below the logger's `min_level` are filtered out before formatting.
pub fn init_tracing(logger: Arc<Logger>) -> Result<(), LoggingError> {
    facade_subscriber(logger).try_init()?;
    Ok(())
}

fn facade_subscriber(logger: Arc<Logger>) -> impl Subscriber + Send + Sync + 'static {
    let level = logger.config().min_level.as_tracing_level();

    tracing_subscriber::registry()
        .with(LevelFilter::from_level(level))
        .with(FacadeLayer::new(logger))
}

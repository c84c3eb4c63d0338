//! Tracing initialization and subscriber setup.

use super::exporter::{create_tracer_provider, FileSpanExporter};
use super::rotation::{RotatingFile, DEFAULT_MAX_BACKUPS, DEFAULT_MAX_BYTES};
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const SERVICE_NAME: &str = "paperfeed";
const TRACE_FILE: &str = "paperfeed-otlp.json";

/// Installs the global subscriber: an [`EnvFilter`] built from
/// `trace_level` (default `info`) feeding the OpenTelemetry file exporter.
///
/// Traces land in `paperfeed-otlp.json` under the plugin data directory.
/// If that directory cannot be created tracing stays off. Calling this more
/// than once is harmless; only the first subscriber is kept.
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info");

    let data_dir = crate::infrastructure::paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![
        KeyValue::new("service.name", SERVICE_NAME),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);

    let file = RotatingFile::new(data_dir.join(TRACE_FILE), DEFAULT_MAX_BYTES, DEFAULT_MAX_BACKUPS);
    let exporter = FileSpanExporter::new(file, resource.clone(), SERVICE_NAME);
    let provider = create_tracer_provider(exporter, resource);

    let tracer = provider.tracer(SERVICE_NAME);
    let otel_layer = OpenTelemetryLayer::new(tracer);

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(otel_layer)
        .try_init();
}

//! # Telemetry
//!
//! Console logging is always on: `tracing` events are rendered through
//! `tracing_subscriber::fmt`, filtered by `RUST_LOG` (default `info`), either
//! pretty-printed or as JSON depending on [`LogFormat`].
//!
//! OpenTelemetry export is opt-in through cargo features:
//!
//! - `traces`: Exports spans.
//! - `metrics`: Exports counters and histograms.
//! - `stdout`: Exporter that prints spans/metrics to stdout.
//! - `otlp`: Exporter that ships spans/metrics over OTLP/gRPC. The endpoint is
//!   taken from `OTEL_EXPORTER_OTLP_ENDPOINT` (default `http://localhost:4317`).
//!
//! Exporters require at least one of `traces` or `metrics`.
//!
//! ```bash
//! cargo run --bin todo-tonic-server --features traces,metrics,stdout
//! ```
//!
//! The metric helpers at the bottom of this module compile to no-ops when the
//! `metrics` feature is disabled.

#[cfg(all(feature = "otlp", not(any(feature = "traces", feature = "metrics"))))]
compile_error!("The 'otlp' feature requires at least one of 'traces' or 'metrics' to be enabled.");

#[cfg(all(feature = "stdout", not(any(feature = "traces", feature = "metrics"))))]
compile_error!(
    "The 'stdout' feature requires at least one of 'traces' or 'metrics' to be enabled."
);

use crate::server::config::LogFormat;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

#[cfg(feature = "metrics")]
use opentelemetry::metrics::{Counter, Histogram, Meter, UpDownCounter};
#[cfg(feature = "metrics")]
use opentelemetry_sdk::metrics as sdkmetrics;
#[cfg(feature = "metrics")]
use std::sync::OnceLock;

#[cfg(any(feature = "metrics", feature = "traces"))]
use opentelemetry::{InstrumentationScope, KeyValue};
#[cfg(any(feature = "metrics", feature = "traces"))]
use opentelemetry_sdk::Resource;
#[cfg(any(feature = "metrics", feature = "traces"))]
use opentelemetry_semantic_conventions as semvcns;

#[cfg(feature = "traces")]
use opentelemetry::trace::TracerProvider;
#[cfg(feature = "traces")]
use opentelemetry_sdk::propagation::TraceContextPropagator;
#[cfg(feature = "traces")]
use opentelemetry_sdk::trace as sdktrace;

const SERVICE_NAME: &str = "todo-tonic-server";

/// Providers that must be flushed and shut down before the process exits.
pub struct TelemetryProviders {
    #[cfg(feature = "traces")]
    pub tracer_provider: sdktrace::SdkTracerProvider,
    #[cfg(feature = "metrics")]
    pub meter_provider: sdkmetrics::SdkMeterProvider,
}

impl TelemetryProviders {
    /// Flushes pending spans and metrics, then shuts the providers down.
    pub fn shutdown(&self) {
        #[cfg(feature = "traces")]
        {
            if let Err(err) = self.tracer_provider.force_flush() {
                eprintln!("Error flushing traces: {err:#?}");
            }
            if let Err(err) = self.tracer_provider.shutdown() {
                eprintln!("Error shutting down tracer: {err:#?}");
            }
        }

        #[cfg(feature = "metrics")]
        {
            if let Err(err) = self.meter_provider.force_flush() {
                eprintln!("Error flushing metrics: {err:#?}");
            }
            if let Err(err) = self.meter_provider.shutdown() {
                eprintln!("Error shutting down meter: {err:#?}");
            }
        }
    }
}

pub fn init_telemetry(log_format: LogFormat) -> anyhow::Result<TelemetryProviders> {
    #[cfg(feature = "traces")]
    opentelemetry::global::set_text_map_propagator(TraceContextPropagator::new());

    #[cfg(feature = "traces")]
    let tracer_provider = init_tracer()?;

    #[cfg(feature = "metrics")]
    let meter_provider = init_metrics()?;

    #[cfg(any(feature = "metrics", feature = "traces"))]
    let scope = InstrumentationScope::builder(SERVICE_NAME)
        .with_version(env!("CARGO_PKG_VERSION"))
        .with_schema_url(semvcns::SCHEMA_URL)
        .build();

    let fmt_layer = match log_format {
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .with_thread_ids(true)
            .with_line_number(true)
            .with_target(false)
            .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
            .with_file(true)
            .pretty()
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .with_thread_ids(true)
            .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
            .json()
            .boxed(),
    };

    let registry = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(fmt_layer);

    #[cfg(feature = "traces")]
    let registry = {
        opentelemetry::global::set_tracer_provider(tracer_provider.clone());
        registry.with(
            tracing_opentelemetry::layer()
                .with_tracer(tracer_provider.tracer_with_scope(scope.clone()))
                .with_error_records_to_exceptions(true),
        )
    };

    #[cfg(feature = "metrics")]
    let registry = {
        opentelemetry::global::set_meter_provider(meter_provider.clone());
        let meter = opentelemetry::global::meter_with_scope(scope);
        init_metric_handles(meter);

        registry.with(tracing_opentelemetry::MetricsLayer::new(
            meter_provider.clone(),
        ))
    };

    registry.try_init()?;

    Ok(TelemetryProviders {
        #[cfg(feature = "traces")]
        tracer_provider,
        #[cfg(feature = "metrics")]
        meter_provider,
    })
}

#[cfg(any(feature = "metrics", feature = "traces"))]
fn resource() -> Resource {
    Resource::builder()
        .with_service_name(SERVICE_NAME)
        .with_schema_url(
            [KeyValue::new(
                semvcns::resource::SERVICE_VERSION,
                env!("CARGO_PKG_VERSION"),
            )],
            semvcns::SCHEMA_URL,
        )
        .build()
}

#[cfg(feature = "metrics")]
fn init_metrics() -> anyhow::Result<sdkmetrics::SdkMeterProvider> {
    let builder = sdkmetrics::SdkMeterProvider::builder().with_resource(resource());

    #[cfg(feature = "stdout")]
    let builder = {
        let exporter = opentelemetry_stdout::MetricExporter::default();
        let reader = sdkmetrics::PeriodicReader::builder(exporter)
            .with_interval(std::time::Duration::from_secs(5))
            .build();
        builder.with_reader(reader)
    };

    #[cfg(feature = "otlp")]
    let builder = {
        use anyhow::Context;

        let exporter = opentelemetry_otlp::MetricExporter::builder()
            .with_tonic()
            .with_temporality(sdkmetrics::Temporality::Delta)
            .build()
            .context("failed to build metrics exporter")?;
        builder.with_periodic_exporter(exporter)
    };

    Ok(builder.build())
}

#[cfg(feature = "traces")]
fn init_tracer() -> anyhow::Result<sdktrace::SdkTracerProvider> {
    let builder = sdktrace::SdkTracerProvider::builder().with_resource(resource());

    #[cfg(feature = "stdout")]
    let builder = builder.with_span_processor(batch_processor(
        opentelemetry_stdout::SpanExporter::default(),
    ));

    #[cfg(feature = "otlp")]
    let builder = {
        use anyhow::Context;

        let exporter = opentelemetry_otlp::SpanExporter::builder()
            .with_tonic()
            .build()
            .context("failed to build tracer exporter")?;
        builder.with_span_processor(batch_processor(exporter))
    };

    Ok(builder.build())
}

#[cfg(all(feature = "traces", any(feature = "stdout", feature = "otlp")))]
fn batch_processor<E>(exporter: E) -> sdktrace::BatchSpanProcessor
where
    E: opentelemetry_sdk::trace::SpanExporter + 'static,
{
    sdktrace::BatchSpanProcessor::builder(exporter)
        .with_batch_config(
            sdktrace::BatchConfigBuilder::default()
                .with_scheduled_delay(std::time::Duration::from_secs(5))
                .with_max_queue_size(2048)
                .build(),
        )
        .build()
}

#[cfg(feature = "metrics")]
static REQUESTS: OnceLock<Counter<u64>> = OnceLock::new();
#[cfg(feature = "metrics")]
static TODOS_CREATED: OnceLock<Counter<u64>> = OnceLock::new();
#[cfg(feature = "metrics")]
static TODOS_STREAMED: OnceLock<Counter<u64>> = OnceLock::new();
#[cfg(feature = "metrics")]
static STREAMS_INFLIGHT: OnceLock<UpDownCounter<i64>> = OnceLock::new();
#[cfg(feature = "metrics")]
static STREAM_ERRORS: OnceLock<Counter<u64>> = OnceLock::new();
#[cfg(feature = "metrics")]
static STREAM_DURATION_MS: OnceLock<Histogram<f64>> = OnceLock::new();

#[cfg(feature = "metrics")]
fn init_metric_handles(meter: Meter) {
    let _ = REQUESTS.set(
        meter
            .u64_counter("requests")
            .with_description("gRPC requests by method")
            .build(),
    );
    let _ = TODOS_CREATED.set(
        meter
            .u64_counter("todos_created")
            .with_description("Todos appended to the list")
            .build(),
    );
    let _ = TODOS_STREAMED.set(
        meter
            .u64_counter("todos_streamed")
            .with_description("Todos sent over readTodosStream")
            .build(),
    );
    let _ = STREAMS_INFLIGHT.set(
        meter
            .i64_up_down_counter("streams_inflight")
            .with_description("Concurrent readTodosStream calls")
            .build(),
    );
    let _ = STREAM_ERRORS.set(
        meter
            .u64_counter("stream_errors")
            .with_description("Errored or cancelled streams")
            .build(),
    );
    let _ = STREAM_DURATION_MS.set(
        meter
            .f64_histogram("stream_duration")
            .with_unit("ms")
            .with_description("End-to-end stream duration")
            .build(),
    );
}

#[cfg(feature = "metrics")]
pub fn increment_requests(method: &'static str) {
    if let Some(counter) = REQUESTS.get() {
        counter.add(1, &[KeyValue::new("rpc.method", method)]);
    }
}

#[cfg(not(feature = "metrics"))]
pub fn increment_requests(_method: &'static str) {}

#[cfg(feature = "metrics")]
pub fn increment_todos_created() {
    if let Some(counter) = TODOS_CREATED.get() {
        counter.add(1, &[]);
    }
}

#[cfg(not(feature = "metrics"))]
pub fn increment_todos_created() {}

#[cfg(feature = "metrics")]
pub fn increment_todos_streamed(count: u64) {
    if let Some(counter) = TODOS_STREAMED.get() {
        counter.add(count, &[]);
    }
}

#[cfg(not(feature = "metrics"))]
pub fn increment_todos_streamed(_count: u64) {}

#[cfg(feature = "metrics")]
pub fn increment_streams_inflight() {
    if let Some(counter) = STREAMS_INFLIGHT.get() {
        counter.add(1, &[]);
    }
}

#[cfg(not(feature = "metrics"))]
pub fn increment_streams_inflight() {}

#[cfg(feature = "metrics")]
pub fn decrement_streams_inflight() {
    if let Some(counter) = STREAMS_INFLIGHT.get() {
        counter.add(-1, &[]);
    }
}

#[cfg(not(feature = "metrics"))]
pub fn decrement_streams_inflight() {}

#[cfg(feature = "metrics")]
pub fn increment_stream_errors() {
    if let Some(counter) = STREAM_ERRORS.get() {
        counter.add(1, &[]);
    }
}

#[cfg(not(feature = "metrics"))]
pub fn increment_stream_errors() {}

#[cfg(feature = "metrics")]
pub fn record_stream_duration(duration_ms: f64) {
    if let Some(histogram) = STREAM_DURATION_MS.get() {
        histogram.record(duration_ms, &[]);
    }
}

#[cfg(not(feature = "metrics"))]
pub fn record_stream_duration(_duration_ms: f64) {}

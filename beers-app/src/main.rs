//! # Beers Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize logging and optional OpenTelemetry export
//! - Initialize the repository and currency adapters
//! - Create the beer service
//! - Start the HTTP server and release resources on shutdown

mod config;

use opentelemetry::global;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace as sdktrace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use beers_hex::{BeerService, inbound::HttpServer};
use beers_repo::build_repo;
use beers_types::BeerRepository;
use exchange_rates::{CurrencyLayerClient, PivotCurrencyService, QuoteProvider, StaticQuotes};

use config::{Config, CurrencyProvider, LogFormat};

fn init_tracer(endpoint: &str) -> anyhow::Result<(sdktrace::Tracer, sdktrace::SdkTracerProvider)> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    // Use gRPC exporter with batch processing (non-blocking)
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()?;

    let provider = sdktrace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .build();

    global::set_tracer_provider(provider.clone());

    use opentelemetry::trace::TracerProvider as _;
    Ok((provider.tracer("beers-service"), provider))
}

/// Installs the global subscriber. Returns the OTLP provider when span
/// export is enabled so it can be flushed on exit.
fn init_tracing(config: &Config) -> anyhow::Result<Option<sdktrace::SdkTracerProvider>> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(&config.log_level))?;

    let (telemetry, provider) = match config.otlp_endpoint.as_deref() {
        Some(endpoint) => {
            let (tracer, provider) = init_tracer(endpoint)?;
            (
                Some(tracing_opentelemetry::layer().with_tracer(tracer)),
                Some(provider),
            )
        }
        None => (None, None),
    };

    let json = (config.log_format == LogFormat::Json)
        .then(|| tracing_subscriber::fmt::layer().json().with_current_span(true));
    let pretty = (config.log_format == LogFormat::Pretty)
        .then(|| tracing_subscriber::fmt::layer().pretty());

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(pretty)
        .with(telemetry)
        .init();

    Ok(provider)
}

fn build_quote_provider(config: &Config) -> anyhow::Result<QuoteProvider> {
    match (config.currency_provider, &config.currency_layer) {
        (CurrencyProvider::CurrencyLayer, Some(layer)) => Ok(QuoteProvider::CurrencyLayer(
            CurrencyLayerClient::new(layer.clone())?,
        )),
        (CurrencyProvider::CurrencyLayer, None) => {
            anyhow::bail!("currencylayer provider selected without its configuration")
        }
        (CurrencyProvider::Static, _) => Ok(QuoteProvider::Static(StaticQuotes::new())),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;

    let otel_provider = init_tracing(&config)?;

    tracing::info!(
        addr = %config.addr(),
        storage = %config.storage,
        currency_provider = ?config.currency_provider,
        "Starting beers server"
    );

    // Build repository (handles connection and migration)
    let repo = build_repo(config.storage, config.database_url.as_deref()).await?;

    // Exchange rates: every conversion pivots through USD
    let currency = PivotCurrencyService::new(build_quote_provider(&config)?);

    // Create the beer service
    let service = BeerService::new(repo, currency);

    // Create and run the HTTP server
    let server = HttpServer::new(service).with_request_timeout(config.request_timeout);
    let result = server.run(&config.addr()).await;

    // Release storage whether or not the server exited cleanly
    if let Err(e) = server.service().repo().close().await {
        tracing::error!(error = %e, "failed to close repository");
    }
    tracing::info!("Server stopped");

    // Ensure traces are flushed before exit
    if let Some(provider) = otel_provider {
        if let Err(e) = provider.shutdown() {
            eprintln!("failed to shut down tracer provider: {e}");
        }
    }

    result
}

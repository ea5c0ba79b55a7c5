//! Cross-Section Service
//!
//! Labeled contour cross-sections of EDR trajectory data, rendered from the
//! command line or served over HTTP.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use edr_protocol::CoverageCollection;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use xsection::client::EdrClient;
use xsection::config::XsectionConfig;
use xsection::decode;
use xsection::pipeline::{CrossSection, RenderSettings};
use xsection::state::AppState;

/// Cross-section renderer
#[derive(Parser, Debug)]
#[command(name = "xsection")]
#[command(about = "Labeled contour cross-sections from OGC EDR trajectory queries")]
struct Args {
    /// Configuration file
    #[arg(long, default_value = "config/xsection.yaml", env = "CONFIG_FILE")]
    config: PathBuf,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, env = "XSECTION_JSON_LOGS")]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the parameters of a collection's newest run
    Parameters {
        /// Service id from the configuration
        #[arg(short, long)]
        collection: String,
    },

    /// Fetch a cross-section and write it as SVG or PNG
    Render {
        #[arg(short, long)]
        collection: String,

        /// Parameter to plot (default: first offered)
        #[arg(short, long)]
        parameter: Option<String>,

        /// Path as WKT LINESTRING (default: configured path)
        #[arg(long)]
        coords: Option<String>,

        /// Minimum label spacing in pixels
        #[arg(long)]
        threshold: Option<f64>,

        /// Output file; a .png extension selects PNG
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Render a CoverageJSON file saved from a trajectory query
    RenderFile {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        parameter: Option<String>,

        #[arg(long)]
        threshold: Option<f64>,

        #[arg(short, long)]
        output: PathBuf,
    },

    /// Run the HTTP server
    Serve {
        /// Listen address
        #[arg(short, long, default_value = "0.0.0.0:8090", env = "XSECTION_LISTEN_ADDR")]
        listen: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    let builder = fmt().with_env_filter(filter).with_target(true).with_level(true);
    if args.json_logs {
        builder.json().init();
    } else {
        builder.init();
    }

    let config = XsectionConfig::load(&args.config)?;

    match args.command {
        Command::Parameters { collection } => list_parameters(&config, &collection).await,
        Command::Render {
            collection,
            parameter,
            coords,
            threshold,
            output,
        } => {
            render_remote(
                &config,
                &collection,
                parameter.as_deref(),
                coords.as_deref(),
                threshold,
                &output,
            )
            .await
        }
        Command::RenderFile {
            input,
            parameter,
            threshold,
            output,
        } => render_file(&config, &input, parameter.as_deref(), threshold, &output),
        Command::Serve { listen } => serve(config, &listen).await,
    }
}

fn client_for(config: &XsectionConfig, collection: &str) -> Result<EdrClient> {
    let service = config
        .find_service(collection)
        .with_context(|| format!("Unknown collection: {}", collection))?;
    Ok(EdrClient::new(
        &service.url,
        Duration::from_secs(config.request_timeout_secs),
    )?)
}

fn settings(config: &XsectionConfig, threshold: Option<f64>) -> RenderSettings {
    match threshold {
        Some(t) => config.render.clone().with_threshold(t),
        None => config.render.clone(),
    }
}

fn write_output(section: &CrossSection, output: &Path) -> Result<()> {
    let is_png = output
        .extension()
        .map(|e| e.eq_ignore_ascii_case("png"))
        .unwrap_or(false);

    let bytes = if is_png {
        section.render_png()?
    } else {
        section.render_svg().into_bytes()
    };

    std::fs::write(output, &bytes)
        .with_context(|| format!("Failed to write: {:?}", output))?;

    info!(
        path = %output.display(),
        bytes = bytes.len(),
        bands = section.features.len(),
        labels = section.labels.len(),
        "Wrote cross-section"
    );
    Ok(())
}

async fn list_parameters(config: &XsectionConfig, collection: &str) -> Result<()> {
    let client = client_for(config, collection)?;
    let instance = client.latest_instance().await?;

    println!("{} ({})", collection, instance.id);
    for (id, parameter) in &instance.parameter_names {
        match (parameter.display_label(), parameter.unit_symbol()) {
            (Some(label), Some(unit)) => println!("  {}\t{} [{}]", id, label, unit),
            (Some(label), None) => println!("  {}\t{}", id, label),
            _ => println!("  {}", id),
        }
    }
    Ok(())
}

async fn render_remote(
    config: &XsectionConfig,
    collection: &str,
    parameter: Option<&str>,
    coords: Option<&str>,
    threshold: Option<f64>,
    output: &Path,
) -> Result<()> {
    let client = client_for(config, collection)?;
    let coords = coords.unwrap_or(config.default_path.as_str());
    let fetched = client.fetch_section(coords, parameter).await?;

    info!(
        instance = %fetched.instance_id,
        parameter = %fetched.parameter,
        "Rendering cross-section"
    );

    let section = CrossSection::compute(&fetched.samples, &settings(config, threshold));
    write_output(&section, output)
}

fn render_file(
    config: &XsectionConfig,
    input: &Path,
    parameter: Option<&str>,
    threshold: Option<f64>,
    output: &Path,
) -> Result<()> {
    let body = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read: {:?}", input))?;
    let collection = CoverageCollection::from_json_str(&body)?;
    let parameter = decode::select_parameter(&collection, parameter)?;
    let samples = decode::samples_from_collection(&collection, &parameter)?;

    info!(parameter = %parameter, samples = samples.len(), "Rendering cross-section from file");

    let section = CrossSection::compute(&samples, &settings(config, threshold));
    write_output(&section, output)
}

async fn serve(config: XsectionConfig, listen: &str) -> Result<()> {
    info!("Starting cross-section server");

    let state = Arc::new(AppState::new(config)?);
    let app = xsection::router(state);

    let addr: SocketAddr = listen
        .parse()
        .with_context(|| format!("Invalid listen address: {}", listen))?;

    info!("Cross-section server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind")?;
    axum::serve(listener, app).await.context("Server failed")?;
    Ok(())
}

use std::{
    path::{Path, PathBuf},
    process::ExitCode,
    sync::Arc,
};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{HttpEffectClient, SubmissionEvent, SubmissionOrchestrator, SubmissionSession};
use serde::Serialize;
use shared::domain::{Effect, ImagePayload, Navigation, Outcome};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod config;

use config::load_settings;

#[derive(Parser, Debug)]
#[command(name = "effect-cli", about = "Apply a remote image effect")]
struct Args {
    /// Image file to send.
    #[arg(long)]
    image: PathBuf,
    /// downscale, upscale, denoise or blur.
    #[arg(long)]
    effect: Option<Effect>,
    /// Blur radius, 1 to 100.
    #[arg(long, allow_hyphen_values = true)]
    radius: Option<i64>,
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long)]
    timeout_seconds: Option<u64>,
    /// Print the outcome and next screen as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    outcome: &'a Outcome,
    navigation: Navigation,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }
    if let Some(timeout_seconds) = args.timeout_seconds {
        settings.request_timeout_seconds = timeout_seconds;
    }

    let client = HttpEffectClient::with_timeout(&settings.server_url, settings.request_timeout())
        .context("failed to configure effect service client")?;
    let orchestrator = SubmissionOrchestrator::new(Arc::new(client));
    let mut events = orchestrator.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            if let SubmissionEvent::Started { effect, .. } = event {
                info!(%effect, "processing; waiting for the effect service");
            }
        }
    });

    let session = SubmissionSession::new();
    session.select_image(read_image(&args.image).await?).await;
    if let Some(effect) = args.effect {
        session.select_effect(effect).await;
    }
    session.set_radius(args.radius).await;

    let outcome = orchestrator.submit(&session).await?;
    let navigation = outcome.navigation();

    if args.json {
        let report = Report {
            outcome: &outcome,
            navigation,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        match &navigation {
            Navigation::ShowResult { output_reference } => println!("{output_reference}"),
            Navigation::StayOnSelection { title, message } => {
                eprintln!("{title}: {message}");
            }
            Navigation::ReturnToUpload { title, message } => {
                eprintln!("{title}: {message}");
                eprintln!("Upload the image again to retry.");
            }
        }
    }

    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn read_image(path: &Path) -> Result<ImagePayload> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read image '{}'", path.display()))?;
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());

    let payload = ImagePayload::new(bytes, filename);
    match image::image_dimensions(path) {
        Ok((width, height)) => Ok(payload.with_dimensions(width, height)),
        Err(error) => {
            debug!(path = %path.display(), %error, "could not probe image dimensions");
            Ok(payload)
        }
    }
}

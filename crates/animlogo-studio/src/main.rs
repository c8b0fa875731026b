//! AnimLogo command-line driver.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use animlogo_genai::{ApiKey, GeminiClient};
use animlogo_models::request::DEFAULT_MOTION_PROMPT;
use animlogo_models::{
    AnimationRequest, ImageSize, LogoAspectRatio, LogoRequest, Resolution, VideoAspectRatio,
    WorkflowState,
};
use animlogo_studio::export::{write_image, write_video};
use animlogo_studio::{
    CredentialError, CredentialProvider, EnvCredentialProvider, OrchestratorConfig,
    ProgressReporter, Workflow,
};

/// Generate a logo and animate it.
#[derive(Parser, Debug)]
#[command(name = "animlogo")]
#[command(about = "Generate a company logo and turn it into a short animation")]
#[command(version)]
struct Args {
    /// Description of the brand and the logo
    #[arg(short, long)]
    prompt: String,

    /// Logo image size (1K, 2K, 4K)
    #[arg(long, default_value = "1K")]
    size: ImageSize,

    /// Logo aspect ratio (1:1, 3:4, 4:3, 9:16, 16:9)
    #[arg(long, default_value = "1:1")]
    aspect_ratio: LogoAspectRatio,

    /// How the logo should move
    #[arg(short, long, default_value = DEFAULT_MOTION_PROMPT)]
    motion: String,

    /// Video aspect ratio (16:9, 9:16)
    #[arg(long, default_value = "16:9")]
    video_aspect_ratio: VideoAspectRatio,

    /// Video resolution (720p, 1080p)
    #[arg(long, default_value = "1080p")]
    resolution: Resolution,

    /// Directory for logo and animation files
    #[arg(short, long, default_value = ".", env = "ANIMLOGO_OUT_DIR")]
    out_dir: PathBuf,

    /// Print the final workflow state as JSON on stdout
    #[arg(long)]
    json: bool,
}

/// Key picker for terminals: environment first, then a prompt on stdin.
struct TerminalCredentialProvider {
    env: EnvCredentialProvider,
    entered: Mutex<Option<ApiKey>>,
}

impl TerminalCredentialProvider {
    fn new() -> Self {
        Self {
            env: EnvCredentialProvider::new(),
            entered: Mutex::new(None),
        }
    }

    fn entered(&self) -> Option<ApiKey> {
        self.entered.lock().ok().and_then(|key| key.clone())
    }
}

#[async_trait]
impl CredentialProvider for TerminalCredentialProvider {
    async fn has_credential(&self) -> Result<bool, CredentialError> {
        Ok(self.api_key().is_some())
    }

    async fn select_credential(&self) -> Result<(), CredentialError> {
        let mut stderr = tokio::io::stderr();
        stderr
            .write_all(b"Enter your Gemini API key: ")
            .await
            .map_err(|e| CredentialError::Host(e.to_string()))?;
        stderr
            .flush()
            .await
            .map_err(|e| CredentialError::Host(e.to_string()))?;

        let mut line = String::new();
        BufReader::new(tokio::io::stdin())
            .read_line(&mut line)
            .await
            .map_err(|e| CredentialError::Host(e.to_string()))?;

        let key = ApiKey::new(line).ok_or(CredentialError::NotSelected)?;
        let mut entered = self
            .entered
            .lock()
            .map_err(|_| CredentialError::Host("credential store poisoned".to_string()))?;
        *entered = Some(key);
        Ok(())
    }

    fn api_key(&self) -> Option<ApiKey> {
        self.entered().or_else(|| self.env.api_key())
    }
}

fn init_tracing() {
    // Colored output for terminals, JSON when LOG_FORMAT=json
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("animlogo_studio=info,animlogo_genai=info"));

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .with(env_filter)
            .init();
    }
}

fn retry_hint(workflow: &Workflow) {
    if workflow.can_retry() {
        eprintln!("The failure looks transient; running the command again may help.");
    }
}

async fn ensure_credential(workflow: &mut Workflow) -> Result<()> {
    if workflow.state() == WorkflowState::AwaitingCredential
        && workflow.select_credential().await == WorkflowState::AwaitingCredential
    {
        bail!(
            "{}",
            workflow.error().unwrap_or("No API key was selected")
        );
    }
    Ok(())
}

async fn run(args: Args) -> Result<()> {
    let client = Arc::new(GeminiClient::from_env().context("Failed to create Gemini client")?);
    let provider = Arc::new(TerminalCredentialProvider::new());

    let progress = ProgressReporter::new();
    let mut updates = progress.subscribe();
    tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let stage = *updates.borrow_and_update();
            if let Some(stage) = stage {
                eprintln!("{}", stage.message());
            }
        }
    });

    let mut workflow =
        Workflow::with_client(client, provider, OrchestratorConfig::from_env(), progress);

    workflow.start().await;
    ensure_credential(&mut workflow).await?;

    let logo = LogoRequest::new(args.prompt, args.size, args.aspect_ratio);
    let animation = AnimationRequest::new(args.motion, args.video_aspect_ratio, args.resolution);
    let mut reselected = false;

    loop {
        if workflow.state() == WorkflowState::ComposingLogo
            && workflow.submit_logo(logo.clone()).await != WorkflowState::ComposingAnimation
        {
            retry_hint(&workflow);
            bail!("{}", workflow.error().unwrap_or("Failed to generate logo."));
        }

        if let Some(image) = workflow.image() {
            let path = write_image(image, &args.out_dir).await?;
            eprintln!("Logo saved to {}", path.display());
        }

        match workflow.submit_animation(animation.clone()).await {
            WorkflowState::Complete => break,
            WorkflowState::AwaitingCredential if !reselected => {
                reselected = true;
                warn!("API key rejected, asking for a new one");
                eprintln!("{}", workflow.error().unwrap_or_default());
                ensure_credential(&mut workflow).await?;
            }
            _ => {
                retry_hint(&workflow);
                bail!("{}", workflow.error().unwrap_or("Failed to animate logo."));
            }
        }
    }

    let video = workflow
        .video()
        .ok_or_else(|| anyhow!("Workflow completed without a video"))?;
    let path = write_video(video, &args.out_dir).await?;
    eprintln!("Animation saved to {}", path.display());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&workflow.view())?);
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Install rustls crypto provider (required for TLS/HTTPS)
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow!("Failed to install rustls crypto provider"))?;

    dotenvy::dotenv().ok();
    init_tracing();

    let args = Args::parse();
    info!("Starting animlogo");

    if let Err(e) = run(args).await {
        error!("{:#}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }

    Ok(())
}

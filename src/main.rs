use anyhow::{bail, Context};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wintoast::{
    ChannelHandler, TemplateType, TextField, ToastConfig, ToastEvent, ToastService, ToastTemplate,
};

/// Post a native toast notification and report what happened to it
#[derive(Parser, Debug)]
#[command(name = "wintoast", version)]
struct Cli {
    /// First line, shown in bold
    #[arg(long)]
    title: String,

    #[arg(long)]
    body: Option<String>,

    #[arg(long)]
    line3: Option<String>,

    /// Local image shown beside the text
    #[arg(long)]
    image: Option<PathBuf>,

    /// Suppress the notification sound
    #[arg(long)]
    silent: bool,

    #[arg(long, default_value = "wintoast.json")]
    config: PathBuf,

    /// Seconds to wait for the toast to be activated, dismissed or fail
    #[arg(long, default_value_t = 10)]
    wait_secs: u64,
}

fn build_template(cli: &Cli) -> wintoast::Result<ToastTemplate> {
    let lines: Vec<&str> = std::iter::once(cli.title.as_str())
        .chain(cli.body.as_deref())
        .chain(cli.line3.as_deref())
        .collect();

    let mut template = ToastTemplate::new(TemplateType::for_content(lines.len(), cli.image.is_some())?);
    let fields = [TextField::FirstLine, TextField::SecondLine, TextField::ThirdLine];
    for (line, field) in lines.into_iter().zip(fields) {
        template.set_text_field(line, field)?;
    }
    if let Some(image) = &cli.image {
        template.set_image_path(image.clone());
    }
    template.set_silent(cli.silent);
    Ok(template)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (for development)
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wintoast=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = ToastConfig::load(&cli.config)?;

    // Register AUMID so the toast carries the app's name and icon
    #[cfg(windows)]
    {
        if config.register_aumid {
            if let Err(e) = wintoast::aumid::register_app_user_model_id(
                &config.app_user_model_id,
                &config.app_name,
                config.icon_path.as_deref(),
            ) {
                tracing::warn!("AUMID registration failed: {}", e);
            }
        }
    }

    let template = build_template(&cli)?;
    let (handler, mut events) = ChannelHandler::new();

    let id = {
        let mut service = ToastService::shared().lock();
        config.apply(&mut *service);
        service
            .initialize()
            .context("Failed to initialize toast service")?;
        service
            .show_toast(&template, Arc::new(handler))
            .context("Failed to show toast")?
    };

    match tokio::time::timeout(Duration::from_secs(cli.wait_secs), events.recv()).await {
        Ok(Some(ToastEvent::Activated { .. })) => println!("activated"),
        Ok(Some(ToastEvent::Dismissed { reason, .. })) => println!("dismissed: {}", reason),
        Ok(Some(ToastEvent::Failed { error, .. })) => bail!("toast {} failed: {}", id, error),
        Ok(None) => tracing::debug!("Toast event channel closed"),
        Err(_) => tracing::info!("No event for toast {} within {}s", id, cli.wait_secs),
    }

    Ok(())
}

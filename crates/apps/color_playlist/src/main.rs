use app_state::{load_app_settings, load_app_settings_from};
use clap::Parser;
use color_eyre::Result;
use color_playlist::cli::Args;
use color_playlist::run::run;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    let settings = match &args.config {
        Some(path) => load_app_settings_from(path)?,
        None => load_app_settings()?,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| settings.logging.level.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    run(args, settings).await
}

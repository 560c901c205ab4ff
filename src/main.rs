use std::{path::PathBuf, sync::Arc};

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use coverwall::{cli, config, types::PkceToken, utils, warning};
use tokio::sync::Mutex;

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Generate a wallpaper from a playlist's cover art
    Wallpaper(WallpaperOptions),

    /// Render a spectrogram for an audio file via the external service
    Spectrogram(SpectrogramOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct WallpaperOptions {
    /// Spotify playlist URL
    url: String,

    /// Target size: desktop (1920x1080) or mobile (1080x2160)
    #[clap(long, default_value = "desktop", value_parser = utils::parse_aspect_preset)]
    ratio: utils::AspectPreset,

    /// Output file path (defaults to a name derived from the playlist)
    #[clap(long)]
    output: Option<PathBuf>,

    /// Seed for a reproducible collage layout
    #[clap(long)]
    seed: Option<u64>,
}

#[derive(Parser, Debug, Clone)]
pub struct SpectrogramOptions {
    /// Audio file to upload
    file: PathBuf,

    /// Output file path (defaults to <file>.spectrogram.png)
    #[clap(long)]
    output: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment file: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth => {
            let oauth_result: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
            cli::auth(Arc::clone(&oauth_result)).await;
        }
        Command::Wallpaper(opt) => {
            cli::wallpaper(opt.url, opt.ratio, opt.output, opt.seed).await
        }
        Command::Spectrogram(opt) => cli::spectrogram(opt.file, opt.output).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}

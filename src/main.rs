use std::{path::PathBuf, sync::Arc};

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use plyzer::{
    analysis::metrics::DEFAULT_TOP_ARTISTS, cli, cli::fail, config::Config, export, utils,
};

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

    /// Analyze a playlist
    Analyze(AnalyzeOptions),

    /// Export the tracks of a playlist as CSV
    Export(ExportOptions),

    /// Run the dashboard API
    Serve,

    /// Create a configuration template in the local data directory
    Setup,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct AnalyzeOptions {
    /// Playlist ID or link (https://open.spotify.com/playlist/<id>)
    #[clap(required_unless_present = "example")]
    pub playlist: Option<String>,

    /// Analyze an example playlist instead
    #[clap(long, conflicts_with = "playlist")]
    pub example: bool,

    /// Number of top artists to list
    #[clap(long, default_value_t = DEFAULT_TOP_ARTISTS)]
    pub top: usize,

    /// Print the analysis as JSON
    #[clap(long)]
    pub json: bool,

    /// Do not print the track table
    #[clap(long)]
    pub no_tracks: bool,

    /// Also write the track table to this CSV file
    #[clap(long)]
    pub csv: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct ExportOptions {
    /// Playlist ID or link
    pub playlist: String,

    /// Target file
    #[clap(long, short, default_value = export::DEFAULT_FILE_NAME)]
    pub output: PathBuf,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn load_config() -> Arc<Config> {
    match Config::resolve() {
        Ok(config) => Arc::new(config),
        Err(e) => fail(&e),
    }
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Command::Auth => cli::auth(load_config()).await,
        Command::Analyze(opt) => {
            let input = match opt.playlist {
                Some(p) if !opt.example => p,
                _ => utils::EXAMPLE_PLAYLIST_ID.to_string(),
            };
            cli::analyze(
                load_config(),
                &input,
                opt.top,
                opt.json,
                opt.no_tracks,
                opt.csv,
            )
            .await
        }
        Command::Export(opt) => cli::export(load_config(), &opt.playlist, opt.output).await,
        Command::Serve => cli::serve(load_config()).await,
        Command::Setup => cli::setup().await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}

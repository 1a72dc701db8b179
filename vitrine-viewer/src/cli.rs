use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use vitrine_core::UserInput;

#[derive(Parser, Debug)]
#[command(name = "vitrine", version)]
#[command(about = "Headless host for the Vitrine three-frame photo gallery")]
pub struct Cli {
    /// Path to a vitrine.toml (overrides VITRINE_CONFIG)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Dotenv file to load before reading the environment
    #[arg(long, global = true)]
    pub env_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch every gallery item from the content API
    Fetch(FetchArgs),
    /// Drive the gallery through a scripted session at a fixed frame rate
    Simulate(SimulateArgs),
    /// Manage the local item cache
    #[command(subcommand)]
    Cache(CacheCommand),
    /// Print the effective configuration (secrets masked)
    Config,
}

#[derive(Debug, Args)]
pub struct FetchArgs {
    /// Skip the cache and always hit the network
    #[arg(long)]
    pub no_cache: bool,

    /// Print items as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct SimulateArgs {
    /// Frames per second of the render loop
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: u32,

    /// Length of the session in seconds
    #[arg(long, default_value_t = 3.0)]
    pub seconds: f64,

    /// Inputs to replay, spread evenly over the session
    #[arg(long, value_enum, value_delimiter = ',')]
    pub script: Vec<ScriptAction>,

    /// Use generated items instead of fetching
    #[arg(long)]
    pub offline: bool,

    /// Number of generated items when running offline
    #[arg(long, default_value_t = 9)]
    pub items: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScriptAction {
    Next,
    Prev,
    Flip,
    Audio,
}

impl From<ScriptAction> for UserInput {
    fn from(action: ScriptAction) -> Self {
        match action {
            ScriptAction::Next => UserInput::NavigateNext,
            ScriptAction::Prev => UserInput::NavigatePrev,
            ScriptAction::Flip => UserInput::ToggleFlip,
            ScriptAction::Audio => UserInput::ToggleAudio,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CacheCommand {
    /// Delete every cached entry
    Clear,
}

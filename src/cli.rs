use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "jelovnik",
    version,
    about = "Kindergarten meal-plan extraction and rendering tooling"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Fetch(FetchArgs),
    Parse(ParseArgs),
    Render(RenderArgs),
    Show(ShowArgs),
}

#[derive(Args, Debug, Clone)]
pub struct FetchArgs {
    #[arg(long, default_value = "https://www.nasaradost.edu.rs/jelovnik/")]
    pub base_url: String,

    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    #[arg(long)]
    pub manifest_path: Option<PathBuf>,

    /// Override the target month as YYYY-MM instead of deriving it from today.
    #[arg(long)]
    pub month: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ParseArgs {
    #[arg(long)]
    pub pdf_path: PathBuf,

    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    #[arg(long)]
    pub menu_path: Option<PathBuf>,

    #[arg(long)]
    pub manifest_path: Option<PathBuf>,

    #[arg(long)]
    pub max_pages: Option<usize>,
}

#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    #[arg(long)]
    pub menu_path: Option<PathBuf>,

    /// Month to summarize as YYYY-MM; defaults to the month of the earliest record.
    #[arg(long)]
    pub month: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ShowArgs {
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Date to show as YYYY-MM-DD; defaults to today.
    #[arg(long)]
    pub date: Option<NaiveDate>,

    #[arg(long, default_value_t = false)]
    pub tomorrow: bool,
}

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "pastpapers",
    version,
    about = "Exam-paper archive tooling: download, validate, merge, and index PDF past papers"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download papers by (year, season, paper code) from the primary archive
    Download(DownloadArgs),
    /// Download dated-variant papers from the secondary archive, with payload validation
    Fetch(FetchArgs),
    /// Write the full download URL list to a CSV file
    Urls(UrlsArgs),
    /// Scan a tree, probe every PDF, and quarantine damaged files
    Check(CheckArgs),
    /// Back up and repair PDFs, moving irreparable files aside
    Clean(CleanArgs),
    /// Merge each paper group into a combined PDF and write its page index
    Merge(MergeArgs),
    /// Prepend index PDFs to combined PDFs
    Mix(MixArgs),
    /// Stamp centered page numbers onto merged PDFs
    Number(NumberArgs),
}

#[derive(Args, Debug, Clone)]
pub struct DownloadArgs {
    #[arg(long, default_value = "Cambridge_Past_Papers_0971")]
    pub out: PathBuf,

    #[arg(long, default_value = "0971")]
    pub subject: String,

    /// Paper codes to fetch; defaults to 21 22 41 42 61 62 when omitted
    #[arg(long = "paper")]
    pub papers: Vec<String>,

    #[arg(long, default_value_t = 2018)]
    pub from_year: u32,

    #[arg(long, default_value_t = 2025)]
    pub to_year: u32,

    #[arg(long, default_value_t = 500)]
    pub delay_ms: u64,

    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,

    #[arg(long)]
    pub summary_path: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct FetchArgs {
    #[arg(long, default_value = "Cambridge_Past_Papers_0620")]
    pub out: PathBuf,

    #[arg(long, default_value_t = 2000)]
    pub delay_ms: u64,

    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,
}

#[derive(Args, Debug, Clone)]
pub struct UrlsArgs {
    #[arg(long, default_value = "0971")]
    pub subject: String,

    #[arg(long = "paper")]
    pub papers: Vec<String>,

    #[arg(long, default_value_t = 2018)]
    pub from_year: u32,

    #[arg(long, default_value_t = 2025)]
    pub to_year: u32,

    #[arg(long, default_value = "cambridge_past_papers_urls.csv")]
    pub output: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    #[arg(long, default_value = "Cambridge_Past_Papers_0971")]
    pub root: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct CleanArgs {
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Skip the interactive confirmation prompt
    #[arg(long, default_value_t = false)]
    pub yes: bool,

    #[arg(long, default_value = "pdf_cleaning.log")]
    pub log_path: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct MergeArgs {
    #[arg(long, default_value = "Cambridge_Past_Papers_0620")]
    pub root: PathBuf,

    #[arg(long, default_value = "Release")]
    pub release_dir: PathBuf,

    /// Paper groups to process; defaults to 2 4 6 when omitted
    #[arg(long = "paper")]
    pub papers: Vec<String>,

    /// Explicit Ghostscript executable; skips discovery
    #[arg(long)]
    pub gs_path: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct MixArgs {
    #[arg(long, default_value = "OL-Past_Paper_Release")]
    pub base_dir: PathBuf,

    /// Explicit Ghostscript executable; skips discovery
    #[arg(long)]
    pub gs_path: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct NumberArgs {
    #[arg(long, default_value = "OL-Past_Paper_Release")]
    pub base_dir: PathBuf,

    /// First page (1-indexed) that receives a number
    #[arg(long, default_value_t = 3)]
    pub start_from_page: u32,

    /// Number printed on that first page
    #[arg(long, default_value_t = 1)]
    pub start_number: u32,
}

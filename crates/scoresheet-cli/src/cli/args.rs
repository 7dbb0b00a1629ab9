use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "scoresheet",
    version,
    about = "Real-time judged evaluation sheets — weighted scoring synced to a shared document store"
)]
pub struct Cli {
    /// Deployment config file (YAML)
    #[arg(long, global = true, env = "SCORESHEET_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the scoring criteria catalog
    Criteria,
    /// Score one submission and save this judge's evaluation
    Evaluate(EvaluateArgs),
    /// Show stored evaluations for a submission
    Show(ShowArgs),
    /// Stream record changes for a submission until Ctrl+C
    Watch(WatchArgs),
}

#[derive(clap::Args, Debug)]
pub struct EvaluateArgs {
    /// Submission id (e.g. Team-Awesome)
    pub submission: String,

    /// Per-criterion score as ID=VALUE (0-10, repeatable)
    #[arg(long = "score", value_name = "ID=VALUE")]
    pub scores: Vec<String>,

    /// Qualitative feedback
    #[arg(long)]
    pub comments: Option<String>,

    /// Team leader name
    #[arg(long)]
    pub team_leader: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Submission id
    pub submission: String,

    /// Only show this judge's evaluation
    #[arg(long)]
    pub judge: Option<String>,

    /// Emit the raw record as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(clap::Args, Debug)]
pub struct WatchArgs {
    /// Submission id
    pub submission: String,
}

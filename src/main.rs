use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use treebump::config::{self, Config};
use treebump::{bump_version, logging, task, ui, verify_bump, BumpError};

#[derive(clap::Parser)]
#[command(
    name = "treebump",
    version,
    about = "Bump and verify version files in a release checkout"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Bump the task's version files and commit the change
    Bump(TaskArgs),
    /// Check that the task's version files already record the target version
    Verify(TaskArgs),
}

#[derive(clap::Args)]
struct TaskArgs {
    #[arg(short, long, help = "Task definition (JSON) carrying version_bump_info")]
    task: PathBuf,

    #[arg(
        short,
        long,
        help = "Checkout to operate on [default: config work_dir, then current directory]"
    )]
    repo: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        let code = e
            .downcast_ref::<BumpError>()
            .map(BumpError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

fn run(args: Args) -> Result<()> {
    let config = config::load_config(args.config.as_deref())?;

    if let Err(e) = logging::init(&config.logging.level) {
        ui::display_status(&format!("Warning: logging disabled: {}", e));
    }
    tracing::debug!(?config, "Configuration loaded");

    match args.command {
        Command::Bump(task_args) => {
            let (repo_root, request) = prepare(&config, &task_args)?;
            ui::display_status(&format!(
                "Bumping {} file(s) to {} in {}",
                request.files.len(),
                request.next_version,
                repo_root.display()
            ));

            let repository = config.repository();
            let report = bump_version(&repository, &repo_root, &request)?;
            ui::display_report(&report);
        }
        Command::Verify(task_args) => {
            let (repo_root, request) = prepare(&config, &task_args)?;
            ui::display_status(&format!(
                "Verifying {} file(s) record {}",
                request.files.len(),
                request.next_version
            ));

            verify_bump(&repo_root, &request)?;
            ui::display_success(&format!(
                "All version files record {}",
                request.next_version
            ));
        }
    }

    Ok(())
}

fn prepare(config: &Config, task_args: &TaskArgs) -> Result<(PathBuf, treebump::BumpRequest)> {
    let request = task::load_task(&task_args.task)
        .with_context(|| format!("Failed to load task {}", task_args.task.display()))?;
    let repo_root = resolve_repo_root(task_args.repo.as_deref(), config);
    Ok((repo_root, request))
}

fn resolve_repo_root(explicit: Option<&Path>, config: &Config) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| config.work_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."))
}

use cairn::areas::refs::Head;
use cairn::areas::repository::Repository;
use cairn::artifacts::merge::outcome::MergeOutcome;
use cairn::artifacts::status::status_info::StatusInfo;
use cairn::errors::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "cairn",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A small single-user version control system",
    long_about = "Snapshots a working directory into checkpoints stored under a .repository \
    directory. Supports staging, branching with refs, loading past checkpoints, \
    restoring paths and merging lineages.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[arg(
        long,
        global = true,
        help = "Root of the repository, defaults to the current directory"
    )]
    repo: Option<PathBuf>,
    #[arg(long, global = true, help = "Print debug logs to stderr")]
    debug: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command creates the .repository directory in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<PathBuf>,
    },
    #[command(
        name = "add",
        about = "Stage files for the next save",
        long_about = "This command stages the current content of the given files. \
        Directories are staged recursively."
    )]
    Add {
        #[arg(required = true, help = "The files or directories to stage")]
        paths: Vec<PathBuf>,
    },
    #[command(
        name = "rm",
        about = "Delete files and stage their removal",
        long_about = "This command deletes the given files from the working directory and \
        stages their removal. Directories apply to every tracked file under them."
    )]
    Rm {
        #[arg(required = true, help = "The files or directories to remove")]
        paths: Vec<PathBuf>,
    },
    #[command(
        name = "save",
        about = "Record the staged changes as a checkpoint",
        long_about = "This command creates a new checkpoint on the current ref from the staged changes."
    )]
    Save {
        #[arg(short, long, help = "The checkpoint message")]
        message: String,
    },
    #[command(
        name = "branch",
        about = "Create a ref at the current checkpoint",
        long_about = "This command binds a new ref to the current checkpoint and switches to it."
    )]
    Branch {
        #[arg(index = 1, help = "The name of the new ref")]
        name: String,
    },
    #[command(name = "refs", about = "List the refs")]
    Refs,
    #[command(name = "log", about = "Show the checkpoints of the current lineage")]
    Log,
    #[command(
        name = "status",
        about = "Show the working directory status",
        long_about = "This command lists staged changes, unstaged changes and untracked files."
    )]
    Status {
        #[arg(long, help = "Print the status in a machine readable format")]
        porcelain: bool,
    },
    #[command(
        name = "load",
        about = "Check out a ref or a checkpoint",
        long_about = "This command replaces the working directory with the snapshot of a ref or \
        checkpoint id. Loading an id detaches head."
    )]
    Load {
        #[arg(index = 1, help = "A ref name, a checkpoint id or an abbreviated id")]
        revision: String,
    },
    #[command(
        name = "restore",
        about = "Restore a path from a revision",
        long_about = "This command replaces a file or directory with its content in a revision. \
        Use HEAD to restore the saved content overlaid with the staged changes."
    )]
    Restore {
        #[arg(index = 1, help = "HEAD, a ref name or a checkpoint id")]
        revision: String,
        #[arg(index = 2, help = "The file or directory to restore")]
        path: PathBuf,
    },
    #[command(
        name = "merge",
        about = "Merge a revision into the current ref",
        long_about = "This command fast-forwards the current ref when possible and otherwise \
        records a merge checkpoint. Changes from the merged revision win on paths changed by both sides."
    )]
    Merge {
        #[arg(index = 1, help = "A ref name or a checkpoint id")]
        revision: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{} {:#}", "error:".red().bold(), error);
            if error.is_validation() {
                ExitCode::from(1)
            } else {
                ExitCode::from(2)
            }
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let pwd = std::env::current_dir()?.canonicalize()?;
    let root = cli.repo.clone().unwrap_or_else(|| pwd.clone());
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Commands::Init { path } => {
            let root = path.map(|path| pwd.join(path)).unwrap_or(root);
            let repository = Repository::create(&root)?;

            writeln!(
                stdout,
                "Initialized empty repository in {}",
                repository.config().metadata_path().display()
            )?;
        }
        Commands::Add { paths } => {
            let mut repository = Repository::open(&root)?;
            for path in paths {
                repository.index_file(pwd.join(path))?;
            }

            repository.save_index()?;
        }
        Commands::Rm { paths } => {
            let mut repository = Repository::open(&root)?;
            for path in &paths {
                repository.remove_file(pwd.join(path))?;
                writeln!(stdout, "rm '{}'", path.display())?;
            }

            repository.save_index()?;
        }
        Commands::Save { message } => {
            let mut repository = Repository::open(&root)?;
            let is_root = match repository.current_checkpoint_id() {
                Some(_) => "",
                None => "(root-save) ",
            };

            let checkpoint = repository.create_save(&message)?;

            writeln!(
                stdout,
                "[{} {}{}] {}",
                repository.head(),
                is_root,
                checkpoint.id().to_short_oid(),
                checkpoint.message()
            )?;
        }
        Commands::Branch { name } => {
            let mut repository = Repository::open(&root)?;
            repository.create_ref(&name)?;

            writeln!(stdout, "Switched to ref '{}'", name)?;
        }
        Commands::Refs => {
            let repository = Repository::open(&root)?;
            print_refs(&repository, &mut stdout)?;
        }
        Commands::Log => {
            let repository = Repository::open(&root)?;
            print_log(&repository, &mut stdout)?;
        }
        Commands::Status { porcelain } => {
            let repository = Repository::open(&root)?;
            let status = repository.get_status()?;

            if porcelain {
                print_porcelain_status(&status, &mut stdout)?;
            } else {
                print_long_status(&repository, &status, &mut stdout)?;
            }
        }
        Commands::Load { revision } => {
            let mut repository = Repository::open(&root)?;
            let checkpoint = repository.load(&revision)?;

            match repository.head() {
                Head::Attached(name) => writeln!(stdout, "Switched to ref '{}'", name)?,
                Head::Detached(id) => writeln!(
                    stdout,
                    "{} {} {}",
                    "HEAD is now detached at".yellow(),
                    id.to_short_oid(),
                    checkpoint.message()
                )?,
            }
        }
        Commands::Restore { revision, path } => {
            let mut repository = Repository::open(&root)?;
            repository.restore(&revision, pwd.join(&path))?;

            writeln!(stdout, "Restored {} from {}", path.display(), revision)?;
        }
        Commands::Merge { revision } => {
            let mut repository = Repository::open(&root)?;
            let outcome = repository.merge(&revision)?;

            print_merge_outcome(&outcome, &mut stdout)?;
        }
    }

    Ok(())
}

fn print_refs(repository: &Repository, writer: &mut impl Write) -> Result<()> {
    let current = match repository.head() {
        Head::Attached(name) => Some(name),
        Head::Detached(id) => {
            writeln!(writer, "* {}", format!("(HEAD detached at {})", id.to_short_oid()).green())?;
            None
        }
    };

    for (name, id) in repository.get_refs() {
        let id = id
            .as_ref()
            .map_or_else(|| "(no saves)".to_string(), |id| id.to_short_oid());

        if Some(name) == current {
            writeln!(writer, "* {} {}", name.to_string().green(), id)?;
        } else {
            writeln!(writer, "  {} {}", name, id)?;
        }
    }

    Ok(())
}

fn print_log(repository: &Repository, writer: &mut impl Write) -> Result<()> {
    let save = repository.get_logs()?;

    for (position, checkpoint) in save.checkpoints().iter().rev().enumerate() {
        if position > 0 {
            writeln!(writer)?;
        }

        writeln!(writer, "{}", format!("save {}", checkpoint.id()).yellow())?;
        if let Some(parent) = checkpoint.parent() {
            writeln!(writer, "Parent: {}", parent)?;
        }
        writeln!(writer, "Date:   {}", checkpoint.readable_timestamp())?;
        writeln!(writer)?;
        writeln!(writer, "    {}", checkpoint.message())?;
    }

    Ok(())
}

fn print_porcelain_status(status: &StatusInfo, writer: &mut impl Write) -> Result<()> {
    for (path, change) in status.changed_files() {
        writeln!(writer, "{} {}", change, display_path(path))?;
    }

    Ok(())
}

fn print_long_status(
    repository: &Repository,
    status: &StatusInfo,
    writer: &mut impl Write,
) -> Result<()> {
    match repository.head() {
        Head::Attached(name) => writeln!(writer, "On ref {}", name)?,
        Head::Detached(id) => writeln!(
            writer,
            "{} {}",
            "HEAD detached at".red(),
            id.to_short_oid()
        )?,
    }

    if status.is_clean() {
        writeln!(writer, "nothing to save, working directory clean")?;
        return Ok(());
    }

    let staged = status.index_changeset();
    if !staged.is_empty() {
        writeln!(writer, "\nChanges to be saved:")?;
        for (path, change) in &staged {
            writeln!(writer, "{}{}", change, display_path(path).green())?;
        }
    }

    let unstaged = status.workspace_changeset();
    if !unstaged.is_empty() {
        writeln!(writer, "\nChanges not staged for save:")?;
        for (path, change) in &unstaged {
            writeln!(writer, "{}{}", change, display_path(path).red())?;
        }
    }

    let untracked = status.untracked_files();
    if !untracked.is_empty() {
        writeln!(writer, "\nUntracked files:")?;
        for path in &untracked {
            writeln!(writer, "        {}", display_path(path).red())?;
        }
    }

    Ok(())
}

fn print_merge_outcome(outcome: &MergeOutcome, writer: &mut impl Write) -> Result<()> {
    match outcome {
        MergeOutcome::UpToDate(_) => writeln!(writer, "Already up to date.")?,
        MergeOutcome::FastForward(checkpoint) => writeln!(
            writer,
            "Fast-forward to {} {}",
            checkpoint.id().to_short_oid(),
            checkpoint.message()
        )?,
        MergeOutcome::Merged {
            checkpoint,
            collisions,
        } => {
            for path in collisions {
                writeln!(
                    writer,
                    "{} {}",
                    "Overwritten by merge:".yellow(),
                    display_path(path)
                )?;
            }
            writeln!(
                writer,
                "[{}] {}",
                checkpoint.id().to_short_oid(),
                checkpoint.message()
            )?;
        }
    }

    Ok(())
}

fn display_path(path: &Path) -> String {
    path.to_string_lossy().replace(std::path::MAIN_SEPARATOR, "/")
}

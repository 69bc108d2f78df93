use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::Command;

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation for orbitview")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run fmt, clippy, tests and doc in order
    Check,
    /// Run cargo fmt --check on all crates
    Fmt,
    /// Run clippy on all crates with warnings denied
    Clippy,
    /// Run all tests
    Test,
    /// Build rustdoc for the workspace
    Doc,
    /// Build the entire workspace
    Build,
    /// Launch the desktop viewer, forwarding any extra arguments
    Run {
        #[arg(trailing_var_arg = true)]
        args: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check => {
            for step in [Commands::Fmt, Commands::Clippy, Commands::Test, Commands::Doc] {
                run_step(step)?;
            }
        }
        other => run_step(other)?,
    }

    Ok(())
}

fn run_step(step: Commands) -> Result<()> {
    match step {
        Commands::Fmt => cargo("fmt --check", &["fmt", "--all", "--", "--check"]),
        Commands::Clippy => cargo(
            "clippy",
            &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
        ),
        Commands::Test => cargo("test", &["test", "--workspace"]),
        Commands::Doc => cargo("doc", &["doc", "--workspace", "--no-deps"]),
        Commands::Build => cargo("build", &["build", "--workspace"]),
        Commands::Run { args } => {
            let mut full = vec!["run", "-p", "orbitview-desktop", "--"];
            full.extend(args.iter().map(String::as_str));
            cargo("run", &full)
        }
        Commands::Check => anyhow::bail!("check cannot be nested"),
    }
}

fn cargo(name: &str, args: &[&str]) -> Result<()> {
    println!("==> Running cargo {name}");
    let status = Command::new("cargo").args(args).status()?;
    if !status.success() {
        anyhow::bail!("cargo {name} failed");
    }
    Ok(())
}

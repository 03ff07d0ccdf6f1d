use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use antrea_operator_tools::{document, rbac, telemetry};
use clap::{CommandFactory, Parser};
use tracing::info;

/// Merge the ClusterRoles found in Antrea manifests into the operator's ClusterRole
#[derive(Parser)]
#[command(name = "generate-role", author, about, long_about = None)]
struct Cli {
    /// YAML files to gather ClusterRole rules from
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,
}

fn run(cli: Cli, program: &str, out: &mut impl Write) -> anyhow::Result<ExitCode> {
    if cli.files.is_empty() {
        writeln!(out, " Usage: {program} <input yaml file>...")?;
        return Ok(ExitCode::FAILURE);
    }

    let docs = document::load_files(&cli.files)?;
    let role = rbac::aggregate(&docs);
    info!(
        rules = role.rules.as_ref().map_or(0, Vec::len),
        "Generated ClusterRole"
    );

    write!(out, "{}", serde_yaml::to_string(&role)?)?;

    Ok(ExitCode::SUCCESS)
}

fn main() -> anyhow::Result<ExitCode> {
    telemetry::init();

    let cli = Cli::parse();
    let program = std::env::args_os()
        .next()
        .map(|arg| arg.to_string_lossy().into_owned())
        .unwrap_or_else(|| Cli::command().get_name().to_owned());

    run(cli, &program, &mut std::io::stdout().lock())
}

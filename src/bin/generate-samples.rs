use std::io::Write;
use std::path::PathBuf;

use antrea_operator_tools::sample::{self, Platform};
use antrea_operator_tools::{document, telemetry};
use clap::Parser;
use tracing::info;

/// Generate an AntreaInstall sample from the Antrea manifests
#[derive(Parser)]
#[command(name = "generate-samples", author, about, long_about = None)]
struct Cli {
    /// YAML files to search for the antrea-config ConfigMap
    #[arg(value_name = "FILE", required = true)]
    files: Vec<PathBuf>,

    #[arg(long, value_enum, default_value_t = Platform::Kubernetes)]
    platform: Platform,

    /// Antrea release, "main" selects the latest development image
    #[arg(long, default_value = "main")]
    version: String,
}

fn run(cli: Cli, out: &mut impl Write) -> anyhow::Result<()> {
    let docs = document::load_files(&cli.files)?;
    let sample = sample::build_sample(cli.platform, Some(&cli.version), &docs);
    info!(platform = %cli.platform, image = ?sample.spec.antrea_image, "Generated sample");

    write!(out, "{}", serde_yaml::to_string(&sample)?)?;

    Ok(())
}

fn main() -> anyhow::Result<()> {
    telemetry::init();

    run(Cli::parse(), &mut std::io::stdout().lock())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["generate-samples", "antrea.yml"]).unwrap();

        assert_eq!(cli.platform, Platform::Kubernetes);
        assert_eq!(cli.version, "main");
        assert_eq!(cli.files, vec![PathBuf::from("antrea.yml")]);
    }

    #[test]
    fn flags() {
        let cli = Cli::try_parse_from([
            "generate-samples",
            "--platform",
            "openshift",
            "--version",
            "1.2.3",
            "antrea.yml",
            "antrea-ipsec.yml",
        ])
        .unwrap();

        assert_eq!(cli.platform, Platform::Openshift);
        assert_eq!(cli.version, "1.2.3");
        assert_eq!(cli.files.len(), 2);
    }

    #[test]
    fn files_are_required() {
        assert!(Cli::try_parse_from(["generate-samples"]).is_err());
        assert!(Cli::try_parse_from(["generate-samples", "--platform", "windows", "a.yml"]).is_err());
    }

    #[test]
    fn prints_sample_with_default_image() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "kind: ConfigMap\nmetadata:\n  name: antrea-config\ndata:\n  antrea-agent.conf: foo\n"
        )
        .unwrap();
        let cli = Cli::try_parse_from([
            "generate-samples".into(),
            file.path().as_os_str().to_owned(),
        ])
        .unwrap();
        let mut out = Vec::new();

        run(cli, &mut out).unwrap();

        let sample: serde_yaml::Value = serde_yaml::from_slice(&out).unwrap();
        assert_eq!(sample["kind"], "AntreaInstall");
        assert_eq!(sample["spec"]["antreaImage"], "antrea/antrea-ubuntu:latest");
        assert_eq!(sample["spec"]["antreaPlatform"], "kubernetes");
        assert_eq!(sample["spec"]["antreaAgentConfig"], "foo");
        assert_eq!(sample["spec"]["antreaCNIConfig"], "");
    }
}

//! CLI command definitions and dispatch.

mod fetch_manifests;
mod releases;
mod render;
mod resolve_image;
mod resolve_revision;
mod version;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use a3s_operator_core::config::OperatorConfig;
use a3s_operator_core::platform::PlatformInstance;
use a3s_operator_runtime::{ComponentResolver, PodImage};

/// A3S Operator: component image resolution and manifest tooling.
#[derive(Parser)]
#[command(name = "a3s-operator", version, about)]
pub struct Cli {
    /// Operator config file (default: ~/.a3s/operator.yaml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Version document to use instead of the embedded one
    #[arg(long, global = true)]
    pub versions: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(long, global = true, value_parser = ["debug", "info", "warn", "error"])]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Load the operator config: file, then environment, then flags.
    pub fn load_config(&self) -> Result<OperatorConfig, Box<dyn std::error::Error>> {
        let mut config = OperatorConfig::load_or_default(self.config.as_deref())?.apply_env();
        if let Some(ref versions) = self.versions {
            config.versions_file = Some(versions.clone());
        }
        Ok(config)
    }
}

/// Available commands.
#[derive(Subcommand)]
pub enum Command {
    /// Resolve the container image of a component
    ResolveImage(resolve_image::ResolveImageArgs),
    /// Show the software revision selected for a component
    ResolveRevision(resolve_revision::ResolveRevisionArgs),
    /// List releases and their components
    Releases(releases::ReleasesArgs),
    /// Download a manifest archive and list its documents
    FetchManifests(fetch_manifests::FetchManifestsArgs),
    /// Render an orchestration template
    Render(render::RenderArgs),
    /// Show version information
    Version(version::VersionArgs),
}

/// Platform instance from config, optionally pinned to another release.
pub(crate) fn platform(config: &OperatorConfig, release: Option<&str>) -> PlatformInstance {
    let mut platform = config.platform.clone();
    if let Some(release) = release {
        platform.spec.version = release.to_string();
    }
    platform
}

/// Build a component resolver from the configured version document.
pub(crate) fn open_resolver(
    config: &OperatorConfig,
    pod_image: Option<&str>,
) -> Result<ComponentResolver, Box<dyn std::error::Error>> {
    let document = config.version_document()?;
    let pod_image = match pod_image {
        Some(image) => PodImage::new(image),
        None => PodImage::from_config(config),
    };
    tracing::debug!(
        default_release = %document.default_release,
        pod_image = ?pod_image.get(),
        "Opened version document"
    );
    Ok(ComponentResolver::new(Arc::new(document), pod_image))
}

/// Dispatch a parsed CLI to the appropriate command handler.
pub async fn dispatch(cli: Cli, config: OperatorConfig) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::ResolveImage(args) => resolve_image::execute(args, &config).await,
        Command::ResolveRevision(args) => resolve_revision::execute(args, &config).await,
        Command::Releases(args) => releases::execute(args, &config).await,
        Command::FetchManifests(args) => fetch_manifests::execute(args).await,
        Command::Render(args) => render::execute(args).await,
        Command::Version(args) => version::execute(args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_resolve_image() {
        let cli = Cli::try_parse_from([
            "a3s-operator",
            "resolve-image",
            "landing",
            "--tag",
            "dev",
            "--versions",
            "/tmp/versions.yaml",
        ])
        .unwrap();
        assert_eq!(cli.versions, Some(PathBuf::from("/tmp/versions.yaml")));
        assert!(matches!(cli.command, Command::ResolveImage(_)));
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        assert!(Cli::try_parse_from(["a3s-operator", "--log-level", "loud", "version"]).is_err());
    }

    #[test]
    fn test_versions_flag_overrides_config() {
        let dir = tempfile::TempDir::new().unwrap();
        let config_path = dir.path().join("operator.yaml");
        std::fs::write(&config_path, "versions-file: /etc/a3s/versions.yaml\n").unwrap();

        let cli = Cli::try_parse_from([
            "a3s-operator",
            "--config",
            config_path.to_str().unwrap(),
            "--versions",
            "/tmp/override.yaml",
            "releases",
        ])
        .unwrap();
        let config = cli.load_config().unwrap();
        assert_eq!(config.versions_file, Some(PathBuf::from("/tmp/override.yaml")));
    }

    #[test]
    fn test_platform_release_pin() {
        let config = OperatorConfig::default();
        assert_eq!(platform(&config, Some("0.3.0")).release_override(), Some("0.3.0"));
        assert_eq!(platform(&config, None).release_override(), None);
    }
}

//! `a3s-operator resolve-revision` command.

use clap::Args;

use a3s_operator_core::config::OperatorConfig;
use a3s_operator_core::versioning::SoftwareRevision;

#[derive(Args)]
pub struct ResolveRevisionArgs {
    /// Component name
    pub component: String,

    /// Software version to select from the release's related revisions
    #[arg(long)]
    pub version: Option<String>,

    /// Platform release to resolve against
    #[arg(long)]
    pub platform_version: Option<String>,

    /// Output as JSON instead of YAML
    #[arg(long)]
    pub json: bool,
}

pub async fn execute(
    args: ResolveRevisionArgs,
    config: &OperatorConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let resolver = super::open_resolver(config, None)?;
    let platform = super::platform(config, args.platform_version.as_deref());
    let version = args
        .version
        .unwrap_or_else(|| platform.component(&args.component).version);

    let revision = resolver.revision(&platform, &args.component, &version)?;
    print!("{}", format_revision(revision, args.json)?);
    Ok(())
}

fn format_revision(
    revision: &SoftwareRevision,
    json: bool,
) -> Result<String, Box<dyn std::error::Error>> {
    if json {
        Ok(format!("{}\n", serde_json::to_string_pretty(revision)?))
    } else {
        Ok(serde_yaml::to_string(revision)?)
    }
}

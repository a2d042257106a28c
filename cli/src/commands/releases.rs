//! `a3s-operator releases` command.

use clap::Args;

use a3s_operator_core::config::OperatorConfig;
use a3s_operator_core::error::OperatorError;
use a3s_operator_core::versioning::{Release, VersionDocument};

use crate::output;

#[derive(Args)]
pub struct ReleasesArgs {
    /// Show the components of a single release
    pub release: Option<String>,

    /// Only show release identifiers (one per line)
    #[arg(short, long)]
    pub quiet: bool,
}

pub async fn execute(
    args: ReleasesArgs,
    config: &OperatorConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let document = config.version_document()?;

    if args.quiet {
        for id in document.releases.keys() {
            println!("{id}");
        }
        return Ok(());
    }

    match args.release {
        Some(ref id) => {
            let release = document
                .release(id)
                .ok_or_else(|| OperatorError::ReleaseNotFound {
                    release: id.clone(),
                })?;
            println!("{}", components_table(release));
        }
        None => println!("{}", releases_table(&document)),
    }
    Ok(())
}

fn releases_table(document: &VersionDocument) -> comfy_table::Table {
    let mut table = output::new_table(&["RELEASE", "COMPONENTS", "RELATED", "DEFAULT"]);
    for (id, release) in &document.releases {
        let related: usize = release.related.values().map(Vec::len).sum();
        let default = if *id == document.default_release {
            "*"
        } else {
            ""
        };
        table.add_row([
            id.clone(),
            release.components.len().to_string(),
            related.to_string(),
            default.to_string(),
        ]);
    }
    table
}

fn components_table(release: &Release) -> comfy_table::Table {
    let mut table = output::new_table(&["COMPONENT", "VERSION", "RELATED VERSIONS"]);
    for (name, revision) in &release.components {
        let related: Vec<&str> = release
            .related_revisions(name)
            .iter()
            .map(|r| r.version.as_str())
            .collect();
        table.add_row([
            name.clone(),
            revision.version.clone(),
            output::or_none(&related.join(", ")),
        ]);
    }
    table
}

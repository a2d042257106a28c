//! `a3s-operator fetch-manifests` command.

use clap::Args;

use a3s_operator_runtime::{fetch_manifests, Manifest};

use crate::output;

#[derive(Args)]
pub struct FetchManifestsArgs {
    /// URL of the `.tar.gz` manifest archive
    pub url: String,

    /// Print the decoded documents as a JSON array
    #[arg(long)]
    pub json: bool,

    /// Only show manifests of this kind (e.g. "Deployment")
    #[arg(long)]
    pub kind: Option<String>,
}

pub async fn execute(args: FetchManifestsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let manifests = fetch_manifests(&args.url).await?;
    let manifests = filter_kind(manifests, args.kind.as_deref());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&manifests)?);
        return Ok(());
    }

    println!("{}", manifests_table(&manifests));
    Ok(())
}

fn filter_kind(manifests: Vec<Manifest>, kind: Option<&str>) -> Vec<Manifest> {
    match kind {
        Some(kind) => manifests
            .into_iter()
            .filter(|m| m.kind().is_some_and(|k| k.eq_ignore_ascii_case(kind)))
            .collect(),
        None => manifests,
    }
}

fn manifests_table(manifests: &[Manifest]) -> comfy_table::Table {
    let mut table = output::new_table(&["KIND", "NAME", "NAMESPACE", "API VERSION"]);
    for manifest in manifests {
        table.add_row([
            output::or_none(manifest.kind().unwrap_or_default()),
            output::or_none(manifest.name().unwrap_or_default()),
            output::or_none(manifest.namespace().unwrap_or_default()),
            output::or_none(manifest.api_version().unwrap_or_default()),
        ]);
    }
    table
}

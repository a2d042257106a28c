//! `a3s-operator version` command.

use clap::Args;

use a3s_operator_core::versioning::VersionDocument;

#[derive(Args)]
pub struct VersionArgs;

pub async fn execute(_args: VersionArgs) -> Result<(), Box<dyn std::error::Error>> {
    println!("a3s-operator version {}", a3s_operator_core::VERSION);
    let embedded = VersionDocument::embedded()?;
    println!("default release {}", embedded.default_release);
    Ok(())
}

//! `a3s-operator resolve-image` command.

use clap::Args;

use a3s_operator_core::config::OperatorConfig;
use a3s_operator_core::platform::ComponentSpec;
use a3s_operator_core::versioning::{ImageKeys, REPOSITORY_IDENTIFIER, TAG_IDENTIFIER};

#[derive(Args)]
pub struct ResolveImageArgs {
    /// Component name (e.g. "landing")
    pub component: String,

    /// Software version of the component (default: the release's revision)
    #[arg(long)]
    pub version: Option<String>,

    /// Platform release to resolve against (default: the document's default release)
    #[arg(long)]
    pub platform_version: Option<String>,

    /// Override the image repository
    #[arg(long)]
    pub repository: Option<String>,

    /// Override the image tag
    #[arg(long)]
    pub tag: Option<String>,

    /// Override the full image reference
    #[arg(long)]
    pub image: Option<String>,

    /// Identifier key holding the repository
    #[arg(long, default_value = REPOSITORY_IDENTIFIER)]
    pub repository_key: String,

    /// Identifier key holding the tag
    #[arg(long, default_value = TAG_IDENTIFIER)]
    pub tag_key: String,

    /// Container image of the operator pod (default: config or $A3S_OPERATOR_IMAGE)
    #[arg(long)]
    pub pod_image: Option<String>,
}

impl ResolveImageArgs {
    /// Component settings from the platform instance with command-line
    /// flags replacing individual fields.
    fn component_spec(&self, configured: ComponentSpec) -> ComponentSpec {
        let mut spec = configured;
        if let Some(ref version) = self.version {
            spec.version = version.clone();
        }
        if let Some(ref repository) = self.repository {
            spec.overrides.repository = repository.clone();
        }
        if let Some(ref tag) = self.tag {
            spec.overrides.tag = tag.clone();
        }
        if let Some(ref image) = self.image {
            spec.overrides.image = image.clone();
        }
        spec
    }
}

pub async fn execute(
    args: ResolveImageArgs,
    config: &OperatorConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let resolver = super::open_resolver(config, args.pod_image.as_deref())?;
    let platform = super::platform(config, args.platform_version.as_deref());
    let spec = args.component_spec(platform.component(&args.component));
    let keys = ImageKeys::new(&args.repository_key, &args.tag_key);

    let image = resolver.image_with_keys(
        &platform,
        &args.component,
        &spec.version,
        &spec.overrides,
        &keys,
    )?;

    println!("{image}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use a3s_operator_core::platform::ImageOverrides;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: ResolveImageArgs,
    }

    fn parse(argv: &[&str]) -> ResolveImageArgs {
        let mut full = vec!["test"];
        full.extend_from_slice(argv);
        TestCli::try_parse_from(full).unwrap().args
    }

    #[test]
    fn test_default_identifier_keys() {
        let args = parse(&["landing"]);
        assert_eq!(args.repository_key, "repository");
        assert_eq!(args.tag_key, "tag");
    }

    #[test]
    fn test_flags_replace_configured_fields() {
        let args = parse(&["landing", "--tag", "dev", "--version", "0.3.0"]);
        let configured = ComponentSpec {
            version: "0.4.0".to_string(),
            overrides: ImageOverrides::new("quay.io/me/landing", "stable", ""),
        };

        let spec = args.component_spec(configured);
        assert_eq!(spec.version, "0.3.0");
        assert_eq!(spec.overrides.repository, "quay.io/me/landing");
        assert_eq!(spec.overrides.tag, "dev");
        assert!(spec.overrides.image.is_empty());
    }

    #[test]
    fn test_no_flags_keeps_configured_spec() {
        let args = parse(&["landing"]);
        let configured = ComponentSpec {
            version: String::new(),
            overrides: ImageOverrides::new("", "", "custom:1"),
        };
        assert_eq!(args.component_spec(configured.clone()), configured);
    }

    #[tokio::test]
    async fn test_execute_embedded_component() {
        let args = parse(&["landing"]);
        execute(args, &OperatorConfig::default()).await.unwrap();
    }

    #[tokio::test]
    async fn test_execute_unknown_component() {
        let args = parse(&["no-such-component"]);
        assert!(execute(args, &OperatorConfig::default()).await.is_err());
    }
}

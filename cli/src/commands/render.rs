//! `a3s-operator render` command.

use std::path::{Path, PathBuf};

use clap::Args;

use a3s_operator_runtime::{render_template, TemplateContext};

#[derive(Args)]
pub struct RenderArgs {
    /// Template file ("-" reads from stdin)
    pub template: PathBuf,

    /// YAML file with template values (a mapping)
    #[arg(short = 'f', long)]
    pub values: Option<PathBuf>,

    /// Set a template value (KEY=VALUE), applied after --values
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,
}

pub async fn execute(args: RenderArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut context = match args.values {
        Some(ref path) => load_values(path)?,
        None => TemplateContext::new(),
    };
    context.extend(parse_set_values(&args.set)?);

    let rendered = if args.template.as_os_str() == "-" {
        render_template(std::io::stdin().lock(), &context)?
    } else {
        let file = std::fs::File::open(&args.template).map_err(|e| {
            format!("Failed to open template {}: {e}", args.template.display())
        })?;
        render_template(file, &context)?
    };

    print!("{rendered}");
    Ok(())
}

fn load_values(path: &Path) -> Result<TemplateContext, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read values file {}: {e}", path.display()))?;
    if content.trim().is_empty() {
        return Ok(TemplateContext::new());
    }
    let values: TemplateContext = serde_yaml::from_str(&content)
        .map_err(|e| format!("Values file {} is not a mapping: {e}", path.display()))?;
    Ok(values)
}

/// Parse `KEY=VALUE` pairs. Values are read as YAML scalars, so
/// `replicas=3` yields a number and `debug=true` a boolean.
fn parse_set_values(vars: &[String]) -> Result<TemplateContext, String> {
    let mut context = TemplateContext::new();
    for var in vars {
        let (key, value) = var
            .split_once('=')
            .ok_or_else(|| format!("Invalid value (expected KEY=VALUE): {var}"))?;
        if key.is_empty() {
            return Err(format!("Invalid value (empty key): {var}"));
        }
        let value = Some(value)
            .filter(|v| !v.is_empty())
            .and_then(|v| serde_yaml::from_str::<serde_json::Value>(v).ok())
            .filter(|v| !v.is_object() && !v.is_array())
            .unwrap_or_else(|| serde_json::Value::String(value.to_string()));
        context.insert(key.to_string(), value);
    }
    Ok(context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_set_values_scalars() {
        let vars = vec![
            "image=docker.io/a3s/web:1.0".to_string(),
            "replicas=3".to_string(),
            "debug=true".to_string(),
        ];
        let context = parse_set_values(&vars).unwrap();
        assert_eq!(context["image"], json!("docker.io/a3s/web:1.0"));
        assert_eq!(context["replicas"], json!(3));
        assert_eq!(context["debug"], json!(true));
    }

    #[test]
    fn test_parse_set_values_value_with_equals() {
        let vars = vec!["args=--level=debug".to_string()];
        let context = parse_set_values(&vars).unwrap();
        assert_eq!(context["args"], json!("--level=debug"));
    }

    #[test]
    fn test_parse_set_values_empty_value() {
        let context = parse_set_values(&["tag=".to_string()]).unwrap();
        assert_eq!(context["tag"], json!(""));
    }

    #[test]
    fn test_parse_set_values_flow_collections_stay_strings() {
        let context = parse_set_values(&["list=[a, b]".to_string()]).unwrap();
        assert_eq!(context["list"], json!("[a, b]"));
    }

    #[test]
    fn test_parse_set_values_missing_equals() {
        assert!(parse_set_values(&["image".to_string()]).is_err());
    }

    #[test]
    fn test_parse_set_values_empty_key() {
        assert!(parse_set_values(&["=value".to_string()]).is_err());
    }

    #[test]
    fn test_load_values() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("values.yaml");
        std::fs::write(&path, "image: docker.io/a3s/web\nports:\n  - 80\n  - 443\n").unwrap();

        let values = load_values(&path).unwrap();
        assert_eq!(values["image"], json!("docker.io/a3s/web"));
        assert_eq!(values["ports"], json!([80, 443]));
    }

    #[test]
    fn test_load_values_empty_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("values.yaml");
        std::fs::write(&path, "\n").unwrap();
        assert!(load_values(&path).unwrap().is_empty());
    }

    #[test]
    fn test_load_values_not_a_mapping() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("values.yaml");
        std::fs::write(&path, "- a\n- b\n").unwrap();
        assert!(load_values(&path).is_err());
    }

    #[tokio::test]
    async fn test_execute_missing_value_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("deploy.yaml.j2");
        std::fs::write(&path, "image: {{ image }}\n").unwrap();

        let args = RenderArgs {
            template: path,
            values: None,
            set: vec![],
        };
        assert!(execute(args).await.is_err());
    }

    #[tokio::test]
    async fn test_execute_with_set_values() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("deploy.yaml.j2");
        std::fs::write(&path, "image: {{ image }}\n").unwrap();

        let args = RenderArgs {
            template: path,
            values: None,
            set: vec!["image=docker.io/a3s/web:1.0".to_string()],
        };
        execute(args).await.unwrap();
    }
}

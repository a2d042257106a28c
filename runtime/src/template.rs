//! Orchestration template rendering.
//!
//! Templates use Jinja syntax (`{{ image }}`, `{% if ... %}`) and are
//! rendered against a key/value context. Referencing a key that is not in
//! the context is an error rather than an empty substitution.

use std::collections::BTreeMap;
use std::io::Read;

use minijinja::{Environment, UndefinedBehavior, Value};

use a3s_operator_core::error::{OperatorError, Result};

/// Key/value context passed to a template.
pub type TemplateContext = BTreeMap<String, serde_json::Value>;

/// Render a template read from `reader`.
pub fn render_template<R: Read>(mut reader: R, context: &TemplateContext) -> Result<String> {
    let mut source = String::new();
    reader.read_to_string(&mut source)?;
    render_str(&source, context)
}

/// Render a template held in memory.
pub fn render_str(source: &str, context: &TemplateContext) -> Result<String> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.set_keep_trailing_newline(true);

    let template = env
        .template_from_str(source)
        .map_err(|e| OperatorError::TemplateError(e.to_string()))?;

    template
        .render(Value::from_serialize(context))
        .map_err(|e| OperatorError::TemplateError(e.to_string()))
}

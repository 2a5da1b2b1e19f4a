//! Log setup and structured records whose attributes are only known at runtime.
//!
//! tracing fields are fixed at compile time, so the attributes of a record are
//! rendered as `key=value` pairs into a single `fields` attribute.

use indexmap::IndexMap;
use serde_json::Value;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// named attributes of a record, in the order they are rendered
pub type Fields = IndexMap<String, Value>;

/// Installs the fmt subscriber. `RUST_LOG` wins over the verbose switch.
pub fn init(verbose: bool) {
    let default = if verbose {
        "genesis_lpp=debug,genesis=debug,info"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// top-level entries of a JSON object, anything else lands under `result`
pub fn fields_of(value: &Value) -> Fields {
    match value {
        Value::Object(map) => map.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
        other => {
            let mut fields = Fields::new();
            fields.insert("result".to_string(), other.clone());
            fields
        }
    }
}

pub fn fields_from_pairs<'a, I>(pairs: I) -> Fields
where
    I: IntoIterator<Item = (&'a String, &'a String)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.clone(), Value::String(v.clone())))
        .collect()
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) if s.is_empty() || s.chars().any(char::is_whitespace) => {
            format!("{:?}", s)
        }
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub fn render(fields: &Fields) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{}={}", k, render_value(v)))
        .collect::<Vec<String>>()
        .join(" ")
}

/// Emits message at level with the rendered fields attached.
pub fn record(level: Level, message: &str, fields: &Fields) {
    let fields = render(fields);
    match level {
        Level::ERROR => tracing::error!(fields = %fields, "{}", message),
        Level::WARN => tracing::warn!(fields = %fields, "{}", message),
        Level::INFO => tracing::info!(fields = %fields, "{}", message),
        Level::DEBUG => tracing::debug!(fields = %fields, "{}", message),
        _ => tracing::trace!(fields = %fields, "{}", message),
    }
}

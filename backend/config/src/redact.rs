//! Config redaction for `linkgrab check` output and startup logs.

use serde_json::Value;

/// Keys whose string values are secrets, compared case-insensitively.
const SECRET_KEYS: &[&str] = &["token", "botToken", "apiKey", "secret", "password"];

/// Replace every secret with its first four characters and `***`.
pub fn redact(value: &Value) -> Value {
    redact_under(value, "")
}

fn is_secret_key(key: &str) -> bool {
    SECRET_KEYS.iter().any(|k| k.eq_ignore_ascii_case(key))
}

fn mask(secret: &str) -> String {
    if secret.chars().count() > 8 {
        format!("{}***", secret.chars().take(4).collect::<String>())
    } else {
        "***".to_string()
    }
}

fn redact_under(value: &Value, key: &str) -> Value {
    match value {
        Value::String(s) if is_secret_key(key) && !s.is_empty() => Value::String(mask(s)),
        Value::Array(items) => Value::Array(items.iter().map(|v| redact_under(v, key)).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), redact_under(v, k)))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Dotted paths of every value `redact` would mask.
pub fn collect_redacted_paths(value: &Value) -> Vec<String> {
    fn walk(value: &Value, path: &str, key: &str, out: &mut Vec<String>) {
        match value {
            Value::String(s) if is_secret_key(key) && !s.is_empty() => out.push(path.to_string()),
            Value::Object(map) => {
                for (k, v) in map {
                    let child = if path.is_empty() { k.clone() } else { format!("{path}.{k}") };
                    walk(v, &child, k, out);
                }
            }
            _ => {}
        }
    }
    let mut paths = Vec::new();
    walk(value, "", "", &mut paths);
    paths
}

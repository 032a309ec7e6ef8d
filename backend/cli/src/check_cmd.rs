//! `linkgrab check`: load and validate the config and the string catalog
//! without connecting to Telegram.

use std::path::Path;

use anyhow::{bail, Result};
use linkgrab_config::{collect_redacted_paths, load_and_prepare, redact};
use linkgrab_i18n::Catalog;

use crate::terminal_output::{note, Note};

pub async fn run(config_path: &Path) -> Result<()> {
    println!("\n🔍 Checking linkgrab configuration\n");
    note(Note::Info, &format!("Config file: {}", config_path.display()));

    let (config, report) = load_and_prepare(config_path).await?;
    for warning in &report.warnings {
        note(Note::Warn, &format!("{}: {}", warning.path, warning.message));
    }
    for error in &report.errors {
        note(Note::Error, &format!("{}: {}", error.path, error.message));
    }

    let catalog_ok = match Catalog::validated() {
        Ok(catalog) => {
            let counts: Vec<String> = catalog
                .key_count()
                .iter()
                .map(|(locale, n)| format!("{}={n}", locale.code()))
                .collect();
            note(Note::Ok, &format!("String catalog complete ({})", counts.join(", ")));
            true
        }
        Err(e) => {
            note(Note::Error, &format!("String catalog: {e}"));
            false
        }
    };

    let value = serde_json::to_value(&config)?;
    let masked = collect_redacted_paths(&value);
    println!("\nEffective config ({} secret(s) masked):\n", masked.len());
    println!("{}", serde_yaml::to_string(&redact(&value))?);

    if !report.is_valid() || !catalog_ok {
        bail!("configuration check failed");
    }
    note(Note::Ok, "All checks passed");
    Ok(())
}

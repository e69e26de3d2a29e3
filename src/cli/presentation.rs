//! CLI presentation: render trees, single values and coercion results as text,
//! JSON or TOML.

use crate::error::SettingsError;
use crate::value::{SettingValue, SettingsTree};
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;

fn invalid_format(format: &str, allowed: &str) -> SettingsError {
    SettingsError::Config(format!(
        "Invalid output format: {} (must be {})",
        format, allowed
    ))
}

/// Flatten a tree into `(dotted.path, value)` rows, depth first in key order.
/// Empty nested trees appear as their own row.
pub fn flatten_tree(tree: &SettingsTree) -> Vec<(String, &SettingValue)> {
    let mut rows = Vec::new();
    collect_rows(tree, None, &mut rows);
    rows
}

fn collect_rows<'a>(
    tree: &'a SettingsTree,
    prefix: Option<&str>,
    rows: &mut Vec<(String, &'a SettingValue)>,
) {
    for (key, value) in tree {
        let path = match prefix {
            Some(prefix) => format!("{}.{}", prefix, key),
            None => key.clone(),
        };
        match value {
            SettingValue::Tree(nested) if !nested.is_empty() => {
                collect_rows(nested, Some(&path), rows)
            }
            _ => rows.push((path, value)),
        }
    }
}

/// Copy of `tree` without null leaves. TOML has no null, so an unset setting
/// is rendered by omitting its key.
fn without_nulls(tree: &SettingsTree) -> SettingsTree {
    tree.iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| {
            let kept = match value {
                SettingValue::Tree(nested) => SettingValue::Tree(without_nulls(nested)),
                other => other.clone(),
            };
            (key.clone(), kept)
        })
        .collect()
}

fn table_for(rows: &[(String, &SettingValue)]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Setting", "Kind", "Value"]);
    for (path, value) in rows {
        table.add_row(vec![path.clone(), value.kind().to_string(), value.to_string()]);
    }
    table
}

/// Render a whole settings tree.
pub fn format_tree(tree: &SettingsTree, format: &str) -> Result<String, SettingsError> {
    match format {
        "json" => Ok(serde_json::to_string_pretty(tree)?),
        "toml" => Ok(toml::to_string(&without_nulls(tree))?),
        "text" => {
            if tree.is_empty() {
                return Ok("(no settings)".to_string());
            }
            Ok(table_for(&flatten_tree(tree)).to_string())
        }
        other => Err(invalid_format(other, "'text', 'json' or 'toml'")),
    }
}

/// Render a single setting found at `path`.
pub fn format_value(path: &str, value: &SettingValue, format: &str) -> Result<String, SettingsError> {
    match format {
        "json" => Ok(serde_json::to_string_pretty(value)?),
        "text" => match value {
            SettingValue::Tree(nested) => {
                let rows: Vec<(String, &SettingValue)> = flatten_tree(nested)
                    .into_iter()
                    .map(|(sub, v)| (format!("{}.{}", path, sub), v))
                    .collect();
                Ok(table_for(&rows).to_string())
            }
            scalar => Ok(scalar.to_string()),
        },
        other => Err(invalid_format(other, "'text' or 'json'")),
    }
}

/// Render the typed result of coercing `token`.
pub fn format_coercion(token: &str, value: &SettingValue, format: &str) -> Result<String, SettingsError> {
    match format {
        "json" => Ok(serde_json::to_string_pretty(&serde_json::json!({
            "token": token,
            "kind": value.kind().to_string(),
            "value": value,
        }))?),
        "text" => Ok(format!("{}\t{}", value.kind(), value)),
        other => Err(invalid_format(other, "'text' or 'json'")),
    }
}

//! Formatted terminal output.
//!
//! We keep formatting code in one place so the validation code stays free of
//! presentation concerns.

use crate::config::{ConfigSchema, TypedConfig};
use crate::contract::Table;

/// Render a config as an aligned `name  type  value  help` listing.
pub fn format_config<S: ConfigSchema>(config: &TypedConfig<S>) -> String {
    let map = config.serialize();
    let rows: Vec<(String, String, String, &str)> = config
        .schema()
        .iter()
        .filter_map(|spec| {
            let value = map.get(spec.name)?;
            Some((spec.name.to_string(), spec.ty.to_string(), value.to_string(), spec.help))
        })
        .collect();

    let w_name = rows.iter().map(|r| r.0.len()).max().unwrap_or(0);
    let w_ty = rows.iter().map(|r| r.1.len()).max().unwrap_or(0);
    let w_val = rows.iter().map(|r| r.2.len()).max().unwrap_or(0);

    let mut out = format!("=== {} ===\n", config.name());
    for (name, ty, value, help) in rows {
        let line = format!("{name:<w_name$}  {ty:<w_ty$}  {value:<w_val$}  {help}");
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Render a short per-column summary followed by the first `head` rows.
pub fn format_table_summary(table: &Table, head: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!("Rows: {}  Columns: {}\n", table.n_rows(), table.n_cols()));

    let w = table.columns().iter().map(|c| c.name.len()).max().unwrap_or(0);
    for c in table.columns() {
        out.push_str(&format!(
            "  {:<w$}  {:<7}  missing={}\n",
            c.name,
            c.data.kind_name(),
            c.data.missing_count()
        ));
    }

    let n = head.min(table.n_rows());
    if n > 0 {
        out.push('\n');
        out.push_str(&table.column_names().join("\t"));
        out.push('\n');
        for row in 0..n {
            let cells: Vec<String> = table.columns().iter().map(|c| c.data.cell_text(row)).collect();
            out.push_str(&cells.join("\t"));
            out.push('\n');
        }
    }
    out
}

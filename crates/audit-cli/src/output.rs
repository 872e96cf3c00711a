use std::fmt::Write;

use audit_service::dto::{ChangeResponse, HistoryResponse, RecentChangesResponse};
use serde::Serialize;

use crate::cli::OutputFormat;

/// Render a response to a string in the requested format.
pub fn render<T: Serialize + Report>(
    value: &T,
    format: OutputFormat,
    datetime_format: &str,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Text => Ok(value.text(datetime_format)),
    }
}

/// Print a response in the requested format.
pub fn output<T: Serialize + Report>(
    value: &T,
    format: OutputFormat,
    datetime_format: &str,
) -> anyhow::Result<()> {
    let rendered = render(value, format, datetime_format)?;
    println!("{rendered}");
    Ok(())
}

/// Plain-text rendering for terminals
pub trait Report {
    fn text(&self, datetime_format: &str) -> String;
}

impl Report for HistoryResponse {
    fn text(&self, datetime_format: &str) -> String {
        let mut out = format!("History of {} {}\n", self.entity_type, self.record_id);
        write_changes(&mut out, &self.changes, datetime_format);
        out
    }
}

impl Report for RecentChangesResponse {
    fn text(&self, datetime_format: &str) -> String {
        let mut out = format!("Recent changes of {} (last {} rows)\n", self.entity_type, self.limit);
        write_changes(&mut out, &self.changes, datetime_format);
        out
    }
}

fn write_changes(out: &mut String, changes: &[ChangeResponse], datetime_format: &str) {
    if changes.is_empty() {
        out.push_str("No changes recorded.");
        return;
    }

    for change in changes {
        let _ = write!(
            out,
            "\n#{} {} {} by {}",
            change.event_id,
            change.created_at.format(datetime_format),
            change.action,
            change.pretty_user_name
        );
        if let Some(record_id) = &change.record_id {
            let _ = write!(out, " (record {record_id})");
        }
        out.push('\n');
        for field in &change.fields {
            let _ = writeln!(out, "  {}", field.description);
        }
    }
}

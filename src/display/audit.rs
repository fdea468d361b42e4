use super::{to_csv, to_json, to_yaml, OutputFormat};
use crate::audit::AuditEntry;
use crate::error::MmResult;

pub fn render_audit_log(entries: &[AuditEntry], format: OutputFormat) -> MmResult<String> {
    match format {
        OutputFormat::Json => to_json(entries),
        OutputFormat::Yaml => to_yaml(entries),
        OutputFormat::Csv => to_csv(
            &["timestamp", "operation", "entity_type", "entity_id", "entity_name", "summary"],
            entries
                .iter()
                .map(|e| {
                    vec![
                        e.timestamp.to_rfc3339(),
                        e.operation.to_string(),
                        e.entity_type.to_string(),
                        e.entity_id.clone(),
                        e.entity_name.clone().unwrap_or_default(),
                        e.summary.clone().unwrap_or_default(),
                    ]
                })
                .collect(),
        ),
        OutputFormat::Table => {
            if entries.is_empty() {
                return Ok("No audit entries.".to_string());
            }
            Ok(entries
                .iter()
                .map(AuditEntry::format_human_readable)
                .collect::<Vec<_>>()
                .join("\n"))
        }
    }
}

//! Output formatting for the CLI.

use crate::cli::OutputFormat;
use crate::error::Result;
use duck_compliance::RuleBaseDescription;
use duck_domain::NormalizedDocument;

/// Output formatter.
#[derive(Debug, Clone, Copy)]
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Format a normalized document.
    pub fn format_document(&self, document: &NormalizedDocument) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(document)?),
            OutputFormat::Text => Ok(Self::document_text(document)),
        }
    }

    /// Format rulebase metadata.
    pub fn format_rulebases(&self, rulebases: &[RuleBaseDescription]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(rulebases)?),
            OutputFormat::Text => Ok(Self::rulebases_text(rulebases)),
        }
    }

    fn document_text(document: &NormalizedDocument) -> String {
        let mut lines: Vec<String> = document
            .document
            .statements
            .iter()
            .map(|s| {
                format!(
                    "{}\t{} {}:{} use={} source={} result={}",
                    s.tracking_id,
                    s.action_code,
                    s.qualifier_code,
                    s.data_category_code,
                    s.use_scope_code,
                    s.source_scope_code,
                    s.result_scope_code
                )
            })
            .collect();

        let mut parts: Vec<(&str, &str)> = document.parts.pairs().collect();
        parts.sort_unstable();
        lines.extend(
            parts
                .into_iter()
                .map(|(raw, canonical)| format!("isA\t{} {}", raw, canonical)),
        );
        lines.join("\n")
    }

    fn rulebases_text(rulebases: &[RuleBaseDescription]) -> String {
        if rulebases.is_empty() {
            return "No rulebases found.".to_string();
        }
        rulebases
            .iter()
            .map(|r| format!("{}\t{}\t{}\t{}", r.id, r.version, r.title, r.filename))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duck_domain::{Document, Parts, Statement};

    fn rulebase(id: &str) -> RuleBaseDescription {
        RuleBaseDescription {
            filename: format!("{}.yml", id),
            id: id.to_string(),
            version: "1".to_string(),
            title: "Rules".to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn test_rulebases_text() {
        let formatter = Formatter::new(OutputFormat::Text);
        let out = formatter
            .format_rulebases(&[rulebase("ccpa"), rulebase("gdpr")])
            .unwrap();
        assert_eq!(out, "ccpa\t1\tRules\tccpa.yml\ngdpr\t1\tRules\tgdpr.yml");
        assert_eq!(formatter.format_rulebases(&[]).unwrap(), "No rulebases found.");
    }

    #[test]
    fn test_document_json_uses_wire_names() {
        let formatter = Formatter::new(OutputFormat::Json);
        let mut parts = Parts::new();
        parts.insert("azure", "cloud_provider");
        let doc = NormalizedDocument {
            document: Document {
                statements: vec![Statement {
                    tracking_id: "s1".to_string(),
                    ..Default::default()
                }],
                ..Default::default()
            },
            parts,
        };

        let out = formatter.format_document(&doc).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["statements"][0]["trackingId"], "s1");
        assert_eq!(value["parts"]["azure"][0], "cloud_provider");
    }
}

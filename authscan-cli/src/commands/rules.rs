//! `authscan rules` command handler

use std::io::Write;

use serde::Serialize;

use authscan_classifier::Classifier;

use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `rules` command.
pub async fn execute(classifier: &Classifier, writer: &OutputWriter) -> Result<(), CliError> {
    let report = RuleListReport::from_classifier(classifier);
    writer.render(&report)?;
    Ok(())
}

#[derive(Serialize)]
pub struct RuleListReport {
    pub total: usize,
    pub rules: Vec<RuleEntry>,
}

#[derive(Serialize)]
pub struct RuleEntry {
    /// 1-based evaluation order
    pub position: usize,
    pub id: String,
    pub kind: String,
    pub title: String,
    pub pattern: String,
}

impl RuleListReport {
    pub fn from_classifier(classifier: &Classifier) -> Self {
        let rules: Vec<RuleEntry> = classifier
            .registry()
            .rules()
            .iter()
            .enumerate()
            .map(|(i, r)| RuleEntry {
                position: i + 1,
                id: r.id().to_owned(),
                kind: r.kind().label().to_owned(),
                title: r.title().to_owned(),
                pattern: r.pattern().to_owned(),
            })
            .collect();

        Self {
            total: rules.len(),
            rules,
        }
    }
}

impl Render for RuleListReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(
            w,
            "Classification Rules ({} total, first match wins)",
            self.total.to_string().bold()
        )?;
        writeln!(w)?;
        writeln!(w, "{:<4} {:<22} {:<22} Title", "#", "ID", "Kind")?;
        writeln!(w, "{}", "-".repeat(80))?;

        for r in &self.rules {
            writeln!(
                w,
                "{:<4} {:<22} {:<22} {}",
                r.position,
                r.id.bold(),
                r.kind,
                r.title
            )?;
            writeln!(w, "     {}", r.pattern.dimmed())?;
        }

        Ok(())
    }
}

//! `authscan classify` command handler

use std::io::Write;

use serde::Serialize;
use tracing::debug;

use authscan_classifier::Classifier;
use authscan_core::types::AuthEvent;

use crate::cli::ClassifyArgs;
use crate::commands::scan::event_line;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `classify` command.
///
/// A line that matches no rule is not an error; the report says so.
pub async fn execute(
    args: ClassifyArgs,
    classifier: &Classifier,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let event = classifier.classify(&args.line);
    debug!(matched = event.is_some(), "classified single line");

    let report = ClassifyReport {
        line: args.line,
        event,
    };
    writer.render(&report)?;

    Ok(())
}

/// Classification result for one line.
#[derive(Debug, Serialize)]
pub struct ClassifyReport {
    /// The line as given
    pub line: String,
    /// Matched event, `null` in JSON when no rule matched
    pub event: Option<AuthEvent>,
}

impl Render for ClassifyReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        match &self.event {
            Some(event) => writeln!(w, "{}", event_line(event)),
            None => writeln!(w, "{}", "no match".dimmed()),
        }
    }
}

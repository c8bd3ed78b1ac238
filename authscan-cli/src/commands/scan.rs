//! `authscan scan` command handler

use std::collections::BTreeMap;
use std::convert::Infallible;
use std::io::Write;

use colored::{ColoredString, Colorize};
use serde::Serialize;
use tracing::info;

use authscan_classifier::{Classifier, LogSource, ScanSummary};
use authscan_core::config::AuthscanConfig;
use authscan_core::pipeline::ReportSink;
use authscan_core::types::{AuthEvent, EventKind};

use crate::cli::ScanArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `scan` command.
///
/// A missing log file is returned as `CliError::InputNotFound`; `main`
/// reports it as a plain diagnostic.
pub async fn execute(
    args: ScanArgs,
    config: &AuthscanConfig,
    classifier: &Classifier,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let kinds = parse_kinds(&args.kinds)?;
    let path = args
        .path
        .unwrap_or_else(|| config.scan.input.clone().into());

    info!(path = %path.display(), filter = ?kinds, "scanning log file");

    let mut source = LogSource::open(&path)
        .await?
        .with_max_line_length(config.scan.max_line_length)?;

    let mut report = ScanReport::new(path.display().to_string(), kinds);
    let summary = classifier.scan_source(&mut source, &mut report).await?;
    report.finish(&summary);

    info!(
        lines_read = summary.lines_read,
        events = summary.events(),
        reported = report.events.len(),
        "scan complete"
    );

    writer.render(&report)?;
    Ok(())
}

/// Parse `--kind` values into event kinds.
fn parse_kinds(raw: &[String]) -> Result<Vec<EventKind>, CliError> {
    raw.iter()
        .map(|s| {
            EventKind::from_str_loose(s).ok_or_else(|| {
                let expected: Vec<_> = EventKind::ALL.iter().map(|k| k.label()).collect();
                CliError::Command(format!(
                    "unknown event kind: {s} (expected: {})",
                    expected.join(", ")
                ))
            })
        })
        .collect()
}

/// Result of scanning one log file.
///
/// Also acts as the report sink during the scan, keeping only events whose
/// kind passes the `--kind` filter.
#[derive(Debug, Serialize)]
pub struct ScanReport {
    /// Scanned log file
    pub source: String,
    /// Lines read from the file, skipped ones included
    pub lines_read: u64,
    /// Lines skipped for exceeding the max line length
    pub lines_skipped: u64,
    /// Classified events before filtering, per kind label
    pub by_kind: BTreeMap<String, u64>,
    /// Reported events in source order
    pub events: Vec<AuthEvent>,
    #[serde(skip)]
    filter: Vec<EventKind>,
}

impl ScanReport {
    pub fn new(source: impl Into<String>, filter: Vec<EventKind>) -> Self {
        Self {
            source: source.into(),
            lines_read: 0,
            lines_skipped: 0,
            by_kind: BTreeMap::new(),
            events: Vec::new(),
            filter,
        }
    }

    /// Copy the scan statistics into the report.
    pub fn finish(&mut self, summary: &ScanSummary) {
        self.lines_read = summary.lines_read;
        self.lines_skipped = summary.lines_skipped;
        self.by_kind = summary.by_kind.clone();
    }

    fn wants(&self, kind: EventKind) -> bool {
        self.filter.is_empty() || self.filter.contains(&kind)
    }
}

impl ReportSink for ScanReport {
    type Error = Infallible;

    fn accept(&mut self, event: AuthEvent) -> Result<(), Self::Error> {
        if self.wants(event.kind()) {
            self.events.push(event);
        }
        Ok(())
    }
}

impl Render for ScanReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        writeln!(
            w,
            "{} relevant events found in {}",
            self.events.len().to_string().bold(),
            self.source.bold()
        )?;
        writeln!(w)?;

        for event in &self.events {
            writeln!(w, "{}", event_line(event))?;
        }

        writeln!(w)?;
        writeln!(
            w,
            "Lines: {} read, {} skipped",
            self.lines_read, self.lines_skipped
        )?;
        for kind in EventKind::ALL {
            let count = self.by_kind.get(kind.label()).copied().unwrap_or(0);
            writeln!(w, "  {:<22} {}", kind.label(), count)?;
        }

        Ok(())
    }
}

/// One event as a report line:
/// `[<kind:<20>] <timestamp> | user: <user:<12> | IP: <address>`
pub(crate) fn event_line(event: &AuthEvent) -> String {
    let label = kind_colored(event.kind(), format!("{:<20}", event.kind().label()));
    format!(
        "[{}] {} | user: {:<12} | IP: {}",
        label,
        event.timestamp(),
        event.user(),
        event.source_address()
    )
}

fn kind_colored(kind: EventKind, text: String) -> ColoredString {
    match kind {
        EventKind::FailUnknownUser | EventKind::FailInvalidUser => text.red(),
        EventKind::LoginSuccess => text.green(),
        EventKind::PrivilegeEscalation => text.yellow().bold(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_events() -> Vec<AuthEvent> {
        vec![
            AuthEvent::new(EventKind::FailUnknownUser, "Jan 16 04:56:52", "admin", "10.0.0.5"),
            AuthEvent::new(EventKind::LoginSuccess, "Jan 16 05:10:03", "alice", "192.168.1.2"),
            AuthEvent::new(
                EventKind::PrivilegeEscalation,
                "Jan 16 05:15:09",
                "root",
                "localhost",
            ),
        ]
    }

    #[test]
    fn test_parse_kinds_accepts_labels_and_names() {
        let kinds = parse_kinds(&["success".to_owned(), "FailInvalidUser".to_owned()]).unwrap();
        assert_eq!(kinds, vec![EventKind::LoginSuccess, EventKind::FailInvalidUser]);
    }

    #[test]
    fn test_parse_kinds_rejects_unknown() {
        let err = parse_kinds(&["cron".to_owned()]).unwrap_err();
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("cron"));
        assert!(err.to_string().contains("privilege_escalation"));
    }

    #[test]
    fn test_report_without_filter_keeps_everything() {
        let mut report = ScanReport::new("Auth.log", Vec::new());
        for e in sample_events() {
            report.accept(e).unwrap();
        }
        assert_eq!(report.events.len(), 3);
    }

    #[test]
    fn test_report_filter_keeps_selected_kinds() {
        let mut report = ScanReport::new("Auth.log", vec![EventKind::PrivilegeEscalation]);
        for e in sample_events() {
            report.accept(e).unwrap();
        }
        assert_eq!(report.events.len(), 1);
        assert_eq!(report.events[0].user(), "root");
    }

    #[test]
    fn test_report_render_text() {
        colored::control::set_override(false);
        let mut report = ScanReport::new("Auth.log", Vec::new());
        for e in sample_events() {
            report.accept(e).unwrap();
        }
        let summary = ScanSummary {
            lines_read: 10,
            lines_skipped: 0,
            by_kind: BTreeMap::from([("success".to_owned(), 1)]),
        };
        report.finish(&summary);

        let mut buffer = Vec::new();
        report.render_text(&mut buffer).expect("rendering should succeed");
        let output = String::from_utf8(buffer).expect("valid UTF-8");

        assert!(output.contains("3 relevant events found in Auth.log"));
        assert!(output.contains(
            "[fail_unknown        ] Jan 16 04:56:52 | user: admin        | IP: 10.0.0.5"
        ));
        assert!(output.contains("| IP: localhost"));
        assert!(output.contains("Lines: 10 read, 0 skipped"));
    }

    #[test]
    fn test_report_json_skips_filter() {
        let mut report = ScanReport::new("Auth.log", vec![EventKind::LoginSuccess]);
        for e in sample_events() {
            report.accept(e).unwrap();
        }
        let value = serde_json::to_value(&report).expect("should serialize");
        assert!(value.get("filter").is_none());
        assert_eq!(value["events"][0]["kind"], "success");
        assert_eq!(value["events"][0]["source_address"], "192.168.1.2");
    }
}

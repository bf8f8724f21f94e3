//! Console output formatter for the agenda workflow

use agenda_application::SpeakerGenerationReport;
use agenda_domain::{
    EventBrief, ExportRow, Panel, PanelExport, PanelStatus, ReadinessReport, Speaker,
};
use colored::Colorize;
use serde_json::json;

/// Formats agenda state for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the working agenda: every panel, every speaker, with ids
    pub fn format_agenda(brief: Option<&EventBrief>, panels: &[Panel]) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Agenda"));
        output.push('\n');
        output.push_str(&Self::brief_lines(brief));

        if panels.is_empty() {
            output.push_str(&format!(
                "\n{}\n",
                "No panels yet. Run `agenda-forge topics` to generate some.".dimmed()
            ));
            output.push_str(&Self::footer());
            return output;
        }

        for panel in panels {
            output.push_str(&Self::format_panel(panel));
        }

        output.push_str(&Self::footer());
        output
    }

    /// One panel with its status and speakers
    pub fn format_panel(panel: &Panel) -> String {
        let mut output = Self::section_header(&format!(
            "Panel {}: {}",
            panel.panel_number, panel.suggested_topic
        ));

        output.push_str(&format!(
            "{} {}  {} {}\n",
            "id:".dimmed(),
            panel.id,
            "status:".dimmed(),
            Self::status_label(panel.status)
        ));
        if !panel.justification.is_empty() {
            output.push_str(&format!("{}\n", Self::indent(&panel.justification, "  ")));
        }

        if !panel.speakers.is_empty() {
            output.push_str(&format!("\n{}\n", "Speakers:".cyan().bold()));
            for speaker in &panel.speakers {
                output.push_str(&Self::format_speaker(speaker));
            }
        }

        output
    }

    pub fn format_speaker(speaker: &Speaker) -> String {
        let mark = if speaker.confirmed {
            "v".green().to_string()
        } else {
            " ".to_string()
        };
        let mut output = format!(
            "  [{}] {} {} {}\n",
            mark,
            speaker.name.bold(),
            format!("- {}", speaker.title).yellow(),
            format!("({})", speaker.id).dimmed()
        );
        if !speaker.expertise.is_empty() {
            output.push_str(&format!("      {} {}\n", "Expertise:".dimmed(), speaker.expertise_label()));
        }
        output.push_str(&format!("{}\n", Self::indent(&speaker.bio, "      ")));
        if let Some(link) = &speaker.linked_in {
            output.push_str(&format!("      {} {}\n", "LinkedIn:".dimmed(), link));
        }
        output
    }

    /// Format the final agenda: confirmed panels with confirmed speakers
    pub fn format_final(brief: Option<&EventBrief>, exports: &[PanelExport]) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Final Agenda"));
        output.push('\n');
        output.push_str(&Self::brief_lines(brief));

        if exports.is_empty() {
            output.push_str(&format!("\n{}\n", "No confirmed speakers yet.".yellow()));
        }

        for export in exports {
            output.push_str(&Self::section_header(&format!(
                "Panel {}: {}",
                export.panel_number, export.suggested_topic
            )));
            if !export.justification.is_empty() {
                output.push_str(&format!("{}\n", Self::indent(&export.justification, "  ")));
            }
            for speaker in &export.speakers {
                output.push_str(&format!(
                    "  * {} {}\n",
                    speaker.name.bold(),
                    format!("- {}", speaker.title).yellow()
                ));
            }
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format as JSON: the panel exports plus the flat rows
    pub fn format_json(exports: &[PanelExport], rows: &[ExportRow]) -> String {
        serde_json::to_string_pretty(&json!({ "panels": exports, "rows": rows }))
            .unwrap_or_else(|_| "{}".to_string())
    }

    /// Summary of a speaker fan-out
    pub fn format_report(report: &SpeakerGenerationReport) -> String {
        let mut output = Self::section_header("Speaker generation");

        for (panel_id, count) in &report.succeeded {
            output.push_str(&format!(
                "  {} {} ({} speakers)\n",
                "v".green(),
                panel_id,
                count
            ));
        }
        for failure in &report.failed {
            output.push_str(&format!(
                "  {} {} {}\n",
                "x".red(),
                failure.panel_id,
                failure.error.to_string().red()
            ));
        }

        let summary = format!(
            "{} panels succeeded, {} failed, {} speakers attached",
            report.succeeded.len(),
            report.failure_count(),
            report.speakers_attached()
        );
        if report.is_complete() {
            output.push_str(&format!("\n{}\n", summary.green()));
        } else {
            output.push_str(&format!("\n{}\n", summary.yellow()));
        }
        output
    }

    /// Explain why a stage gate is closed
    pub fn format_readiness(stage: &str, report: &ReadinessReport) -> String {
        if report.is_ready() {
            return format!("{} {} ready\n", "v".green(), stage);
        }
        if !report.has_candidates {
            return format!(
                "{} {} not ready: no confirmed panels\n",
                "x".red(),
                stage
            );
        }
        let blocking: Vec<&str> = report.blocking.iter().map(|id| id.as_str()).collect();
        format!(
            "{} {} not ready, waiting on: {}\n",
            "x".red(),
            stage,
            blocking.join(", ")
        )
    }

    fn brief_lines(brief: Option<&EventBrief>) -> String {
        match brief {
            Some(brief) => {
                let mut lines = format!(
                    "{} {}\n{} {}\n",
                    "Event:".cyan().bold(),
                    brief.event_name(),
                    "Topic:".cyan().bold(),
                    brief.main_topic()
                );
                if !brief.additional_info().is_empty() {
                    lines.push_str(&format!("{} {}\n", "Notes:".cyan().bold(), brief.additional_info()));
                }
                lines
            }
            None => String::new(),
        }
    }

    fn status_label(status: PanelStatus) -> String {
        match status {
            PanelStatus::Draft => status.as_str().dimmed().to_string(),
            PanelStatus::Confirmed => status.as_str().green().bold().to_string(),
            PanelStatus::Regenerating => status.as_str().yellow().to_string(),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

//! Console output formatting

use colored::Colorize;
use serde::Serialize;
use std::path::Path;
use tunebridge_application::{InitReport, MusicSearchResult};
use tunebridge_domain::{Classification, ConfigIssue, NlResponse, PerformanceStats};

/// Formats results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the analysis of one message
    pub fn format_response(response: &NlResponse) -> String {
        let mut output = String::new();

        match &response.response {
            Some(reply) => output.push_str(&format!("{} {}\n", "Reply:".cyan().bold(), reply)),
            None => output.push_str(&format!("{}\n", "(no reply)".dimmed())),
        }

        let music = if response.is_music_command {
            "yes".green().bold()
        } else {
            "no".normal()
        };
        output.push_str(&format!("{} {}\n", "Music command:".cyan().bold(), music));

        if let Some(query) = &response.extracted_query {
            output.push_str(&format!("{} {}\n", "Query:".cyan().bold(), query));
        }

        output.push_str(&format!(
            "{}\n",
            format!(
                "confidence {:.2} | {:.1} ms | {}",
                response.confidence, response.processing_time_ms, response.model_used
            )
            .dimmed()
        ));

        output
    }

    /// Format a search outcome
    pub fn format_search(query: &str, result: Option<&MusicSearchResult>) -> String {
        let Some(result) = result else {
            return format!("{} {}\n", "No track found for".yellow(), query.bold());
        };

        let track = &result.track;
        let mut output = format!(
            "{} {} {} {}\n",
            format!("[{}]", track.source).magenta().bold(),
            track.title.bold(),
            "by".dimmed(),
            track.artist
        );
        output.push_str(&format!("  {}\n", track.url.underline()));
        if let Some(duration) = track.duration_display() {
            output.push_str(&format!("  {} {}\n", "Duration:".dimmed(), duration));
        }
        if let Some(thumbnail) = &track.thumbnail {
            output.push_str(&format!("  {} {}\n", "Thumbnail:".dimmed(), thumbnail));
        }
        output
    }

    /// Format the model warm-up report
    pub fn format_init(report: &InitReport) -> String {
        let mut output = Self::header("Model Initialization");
        output.push('\n');

        for status in &report.models {
            let mark = if status.ready {
                "v".green().bold()
            } else {
                "x".red().bold()
            };
            output.push_str(&format!("  {} {:<16} {}", mark, status.role, status.model));
            if let Some(error) = &status.error {
                output.push_str(&format!("  {}", error.red()));
            }
            output.push('\n');
        }

        let summary = format!(
            "{}/{} ready in {:.0} ms",
            report.ready_count(),
            report.models.len(),
            report.elapsed_ms
        );
        let summary = if report.all_ready() {
            summary.green()
        } else {
            summary.yellow()
        };
        output.push_str(&format!("\n{}\n", summary));
        output
    }

    pub fn format_stats(stats: &PerformanceStats) -> String {
        let mut output = Self::section_header("Performance");
        output.push_str(&format!("  Requests:        {}\n", stats.total_requests));
        output.push_str(&format!(
            "  Avg latency:     {:.1} ms\n",
            stats.avg_processing_time_ms
        ));
        output.push_str(&format!(
            "  Cache hits:      {}/{} ({:.0}%)\n",
            stats.cache_hits,
            stats.cache_lookups,
            stats.cache_hit_rate * 100.0
        ));
        output
    }

    /// Format ranked labels with a score bar
    pub fn format_classifications(title: &str, labels: &[Classification]) -> String {
        let mut output = format!("{}\n", title.cyan().bold());
        if labels.is_empty() {
            output.push_str(&format!("  {}\n", "(no labels)".dimmed()));
        }
        for label in labels {
            let width = (label.score.clamp(0.0, 1.0) * 20.0).round() as usize;
            output.push_str(&format!(
                "  {:<12} {:<20} {:.2}\n",
                label.label,
                "#".repeat(width).green(),
                label.score
            ));
        }
        output
    }

    pub fn format_issues(issues: &[ConfigIssue]) -> String {
        issues
            .iter()
            .map(|issue| {
                let tag = if issue.is_error() {
                    "error".red().bold()
                } else {
                    "warning".yellow().bold()
                };
                format!("{}: {}\n", tag, issue.message)
            })
            .collect()
    }

    pub fn format_download(path: &Path) -> String {
        format!("{} {}\n", "Saved".green().bold(), path.display())
    }

    /// Format any result as JSON
    pub fn format_json<T: Serialize>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(48);
        format!("{}\n{:^48}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("{}\n{}\n", title.cyan().bold(), "-".repeat(32))
    }
}

use std::time::Duration;

use crate::terminal::colors;
use colored::*;
use gatecheck_common::log::PRINT_TARGET;
use gatecheck_common::outcome::{self, CheckReport, CheckStatus};
use tracing::info;
use unicode_width::UnicodeWidthStr;

pub const TOTAL_WIDTH: usize = 64;
const KEY_WIDTH: usize = 8;

pub fn print(msg: &str) {
    info!(target: PRINT_TARGET, "{msg}");
}

pub fn banner(no_banner: bool, q_level: u8) {
    if no_banner || q_level > 0 {
        return;
    }

    let text_content: String = format!("⟦ GATECHECK v{} ⟧ ", env!("CARGO_PKG_VERSION"));
    let text_width: usize = UnicodeWidthStr::width(text_content.as_str());
    let text: ColoredString = text_content.bright_green().bold();
    let sep: ColoredString = "═".repeat(TOTAL_WIDTH.saturating_sub(text_width) / 2).bright_black();
    let output: String = format!("{}{}{}", sep, text, sep);

    print(&output);
}

pub fn header(msg: &str, q_level: u8) {
    if q_level > 0 {
        return;
    }

    let formatted: String = format!("⟦ {} ⟧", msg);
    let msg_len: usize = formatted.chars().count();

    let dash_count: usize = TOTAL_WIDTH.saturating_sub(msg_len);
    let left: usize = dash_count / 2;
    let right: usize = dash_count - left;

    let line: ColoredString = format!(
        "{}{}{}",
        "─".repeat(left),
        formatted.to_uppercase().bright_green(),
        "─".repeat(right)
    )
    .bright_black();

    print(&format!("{}", line));
}

pub fn fat_separator() {
    let sep: ColoredString = "═".repeat(TOTAL_WIDTH).bright_black();
    print(&format!("{}", sep));
}

pub fn print_status<T: AsRef<str>>(msg: T) {
    let prefix: ColoredString = ">".color(colors::SEPARATOR);
    let message: String = format!("{} {}", prefix, msg.as_ref().color(colors::TEXT_DEFAULT));
    print(&message);
}

pub fn tree_head(idx: usize, name: &str, status: &CheckStatus) {
    let idx_str: String = format!("[{}]", idx.to_string().color(colors::ACCENT));
    let output: String = format!(
        "{} {} {}",
        idx_str.color(colors::SEPARATOR),
        name.color(colors::PRIMARY),
        status_badge(status)
    );
    print(&output);
}

pub fn as_tree_one_level(key_value_pair: &[(String, ColoredString)]) {
    for (i, (key, value)) in key_value_pair.iter().enumerate() {
        let last: bool = i + 1 == key_value_pair.len();
        let branch: ColoredString = if !last {
            "├─".bright_black()
        } else {
            "└─".bright_black()
        };
        let output: String = format!(
            " {} {}{}{} {}",
            branch,
            key.color(colors::TEXT_DEFAULT),
            ".".repeat(KEY_WIDTH.saturating_sub(key.len())).color(colors::SEPARATOR),
            ":".color(colors::SEPARATOR),
            value
        );
        print(&output);
    }
}

pub fn centerln(msg: &str) {
    let space = " ".repeat(TOTAL_WIDTH.saturating_sub(console::measure_text_width(msg)) / 2);
    print(&format!("{}{}{}", space, msg, space));
}

fn status_badge(status: &CheckStatus) -> ColoredString {
    match status {
        CheckStatus::Passed => "PASSED".color(colors::PASSED).bold(),
        CheckStatus::Failed => "FAILED".color(colors::FAILED).bold(),
        CheckStatus::Skipped { .. } => "SKIPPED".color(colors::SKIPPED).bold(),
    }
}

fn report_details(report: &CheckReport) -> Vec<(String, ColoredString)> {
    let mut details: Vec<(String, ColoredString)> = report
        .details
        .iter()
        .map(|(key, value)| (key.clone(), value.as_str().normal()))
        .collect();

    if let CheckStatus::Skipped { reason } = &report.status {
        details.push(("reason".to_string(), reason.as_str().yellow()));
    }
    details.push((
        "time".to_string(),
        format!("{:.2}s", report.elapsed.as_secs_f64()).normal(),
    ));
    details
}

/// Prints every report followed by the verdict line.
pub fn results(reports: &[CheckReport], total_time: Duration, q_level: u8) {
    if q_level < 2 {
        header("results", q_level);
        for (idx, report) in reports.iter().enumerate() {
            tree_head(idx, report.name, &report.status);
            as_tree_one_level(&report_details(report));
        }
    }

    let failed: usize = reports.iter().filter(|report| report.failed()).count();
    let skipped: usize = reports
        .iter()
        .filter(|report| matches!(report.status, CheckStatus::Skipped { .. }))
        .count();
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();

    let verdict: ColoredString = if outcome::all_passed(reports) {
        "ALL CHECKS PASSED".green().bold()
    } else {
        format!("{failed} CHECK(S) FAILED").red().bold()
    };
    let mut output: String = format!("{verdict} in {total_time}");
    if skipped > 0 {
        output.push_str(&format!(" ({} skipped)", skipped.to_string().yellow()));
    }

    match q_level {
        0 => {
            fat_separator();
            centerln(&output);
        }
        _ => print(&output),
    }
}

//! Console output utilities
//!
//! Human-readable summaries printed after each pipeline step.

use crate::pipeline::StepReport;

/// Format a count with `,` as the thousands separator
#[must_use]
pub fn format_count(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Render a step report as the block printed to the console
#[must_use]
pub fn render_step_report(report: &StepReport) -> String {
    let underline = "-".repeat(report.step.chars().count() + 3);
    format!(
        "\n🧩 {}\n{}\n  Associations : {}\n  Unique genes : {}\n  Unique diseases : {}",
        report.step,
        underline,
        format_count(report.rows),
        format_count(report.unique_genes),
        format_count(report.unique_diseases),
    )
}

/// Print a summary of dataset size and diversity after a step
pub fn print_step_report(report: &StepReport) {
    println!("{}", render_step_report(report));
}

/// Print the closing line of a pipeline run
pub fn print_completion() {
    println!("\n✅ Dataset filtering complete.");
}

use crate::cleaner::{FileReport, FileStatus, Summary, TraversalResult};
use crate::policy::IgnorePolicy;
use crate::utils::normalize_display_path;
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::io::Write;
use std::time::Duration;

/// Print the ignore tokens in styled format.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_ignore_list(
    writer: &mut impl Write,
    policy: &IgnorePolicy,
    dry_run: bool,
) -> std::io::Result<()> {
    if policy.tokens().is_empty() {
        writeln!(writer, "{}", "[OK] No ignore tokens".green())?;
    } else {
        let list = policy.tokens().join(", ");
        writeln!(writer, "{} {}", "Ignoring:".yellow().bold(), list.dimmed())?;
    }
    if dry_run {
        writeln!(writer, "{}", "Dry run: no file will be written".cyan().bold())?;
    }
    Ok(())
}

/// Create a progress bar; its length is set once files are discovered.
///
/// In test mode, returns a hidden progress bar to avoid polluting test output.
#[must_use]
pub fn create_progress_bar() -> ProgressBar {
    // In test mode, return a hidden progress bar to avoid polluting test output
    if cfg!(test) {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::stderr_with_hz(20));
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░"),
    );
    pb.set_message("cleaning...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Print the main header with box-drawing characters.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_header(writer: &mut impl Write, dry_run: bool) -> std::io::Result<()> {
    let title = if dry_run {
        "║  Console Cleanup (dry run)             ║"
    } else {
        "║  Console Cleanup Results               ║"
    };
    writeln!(writer)?;
    writeln!(
        writer,
        "{}",
        "╔════════════════════════════════════════╗".cyan()
    )?;
    writeln!(writer, "{}", title.cyan().bold())?;
    writeln!(
        writer,
        "{}",
        "╚════════════════════════════════════════╝".cyan()
    )?;
    writeln!(writer)?;
    Ok(())
}

/// Print summary with colored "pills".
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_summary_pills(writer: &mut impl Write, summary: &Summary) -> std::io::Result<()> {
    fn pill(label: &str, count: usize, bad: bool) -> String {
        if count == 0 {
            format!("{}: {}", label, count.to_string().dimmed())
        } else if bad {
            format!("{}: {}", label, count.to_string().red().bold())
        } else {
            format!("{}: {}", label, count.to_string().green().bold())
        }
    }

    writeln!(
        writer,
        "{}  {}  {}  {}",
        pill("Modified", summary.modified, false),
        pill("Unchanged", summary.unchanged, false),
        pill("Skipped", summary.skipped, true),
        pill("Failed", summary.failed, true),
    )?;
    writeln!(
        writer,
        "{}",
        format!(
            "Removed {} call(s) across {} file(s)",
            summary.calls_removed.to_string().bold(),
            summary.files_seen.to_string().bold()
        )
        .dimmed()
    )?;
    writeln!(writer)?;
    Ok(())
}

/// Helper to create a styled table
fn create_table(headers: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers);
    table
}

/// Print the files that were modified, with their removal counts.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_modified(writer: &mut impl Write, result: &TraversalResult) -> std::io::Result<()> {
    let rows: Vec<(&FileReport, usize)> = result
        .files
        .iter()
        .filter_map(|r| match r.status {
            FileStatus::Modified { removed } => Some((r, removed)),
            _ => None,
        })
        .collect();
    if rows.is_empty() {
        return Ok(());
    }

    let title = if result.dry_run {
        "Would Modify"
    } else {
        "Modified"
    };
    writeln!(writer, "\n{}", title.bold().underline().green())?;

    let mut table = create_table(vec!["File", "Calls Removed"]);
    for (report, removed) in rows {
        table.add_row(vec![
            Cell::new(normalize_display_path(&report.path)).add_attribute(Attribute::Bold),
            Cell::new(removed).fg(Color::Green),
        ]);
    }

    writeln!(writer, "{table}")?;
    Ok(())
}

/// Print skipped and failed files with their reasons.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_problems(writer: &mut impl Write, result: &TraversalResult) -> std::io::Result<()> {
    let rows: Vec<(&FileReport, &str, &str, Color)> = result
        .files
        .iter()
        .filter_map(|r| match &r.status {
            FileStatus::Skipped { reason } => Some((r, "skipped", reason.as_str(), Color::Yellow)),
            FileStatus::Failed { error } => Some((r, "failed", error.as_str(), Color::Red)),
            _ => None,
        })
        .collect();
    if rows.is_empty() {
        return Ok(());
    }

    writeln!(writer, "\n{}", "Not Cleaned".bold().underline().red())?;

    let mut table = create_table(vec!["File", "Status", "Reason"]);
    for (report, status, reason, color) in rows {
        table.add_row(vec![
            Cell::new(normalize_display_path(&report.path)).add_attribute(Attribute::Bold),
            Cell::new(status).fg(color),
            Cell::new(reason),
        ]);
    }

    writeln!(writer, "{table}")?;
    Ok(())
}

/// Print the full report.
///
/// # Errors
///
/// Returns an error if writing to the writer fails.
pub fn print_report(writer: &mut impl Write, result: &TraversalResult) -> std::io::Result<()> {
    print_header(writer, result.dry_run)?;
    print_summary_pills(writer, &result.summary)?;
    print_modified(writer, result)?;
    print_problems(writer, result)?;
    Ok(())
}

/// Print a quiet report (summary line only) for CI/CD mode.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_report_quiet(writer: &mut impl Write, result: &TraversalResult) -> std::io::Result<()> {
    let s = &result.summary;
    writeln!(
        writer,
        "[SUMMARY] {} call(s) removed, {} modified, {} skipped, {} failed",
        s.calls_removed, s.modified, s.skipped, s.failed
    )?;
    Ok(())
}

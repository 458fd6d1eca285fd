use crate::commands::AnnotateReport;
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::io::Write;
use std::time::Duration;

/// Create a progress bar with file count.
///
/// In test mode, returns a hidden progress bar to avoid polluting test output.
#[must_use]
pub fn create_progress_bar(total_files: u64) -> ProgressBar {
    if cfg!(test) {
        return ProgressBar::hidden();
    }

    let pb =
        ProgressBar::with_draw_target(Some(total_files), ProgressDrawTarget::stderr_with_hz(20));
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░"),
    );
    pb.set_message("annotating...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Print every changed file with its annotations.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_changes(writer: &mut impl Write, report: &AnnotateReport) -> std::io::Result<()> {
    if report.changes.is_empty() {
        writeln!(writer, "{}", "No undocumented schemas found.".green())?;
        return Ok(());
    }

    if report.applied {
        writeln!(writer, "\n{}", "Annotated schemas:".cyan())?;
    } else {
        writeln!(
            writer,
            "\n{}",
            "[DRY-RUN] Schemas that would be annotated:".yellow()
        )?;
    }

    for change in &report.changes {
        writeln!(writer, "  {}", change.file.bold())?;
        for annotation in &change.annotations {
            writeln!(
                writer,
                "    {} {}:{} {}",
                "+".green(),
                annotation.line,
                annotation.column,
                annotation.description
            )?;
        }
    }

    if !report.applied {
        writeln!(writer, "\n{}", "Run with --apply to write these changes.".dimmed())?;
    }
    Ok(())
}

/// Print the run summary as a table.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_summary_table(writer: &mut impl Write, report: &AnnotateReport) -> std::io::Result<()> {
    let mut table = create_table(vec![
        "Files Scanned",
        "Files Matched",
        "Files Changed",
        "Annotations",
        "Failures",
    ]);

    let failure_color = if report.failures.is_empty() {
        Color::Green
    } else {
        Color::Yellow
    };
    table.add_row(vec![
        Cell::new(report.files_scanned),
        Cell::new(report.files_matched),
        Cell::new(report.changes.len()).add_attribute(Attribute::Bold),
        Cell::new(report.annotations).add_attribute(Attribute::Bold),
        Cell::new(report.failures.len()).fg(failure_color),
    ]);

    writeln!(writer)?;
    writeln!(writer, "{table}")?;
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

//! The `mockview report` command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use mockview_core::report::FinalReport;
use mockview_report::{generate_html, write_html_report};

use super::{engine, print_json};

pub async fn execute(
    config_path: Option<PathBuf>,
    session_id: String,
    format: String,
    output: Option<PathBuf>,
) -> Result<()> {
    let engine = engine(config_path.as_deref())?;
    let report = engine.final_report(&session_id).await?;

    match format.as_str() {
        "json" => match &output {
            Some(path) => report.save_json(path)?,
            None => print_json(&report)?,
        },
        "html" => {
            let summary = engine.round_summary(&session_id).await?;
            match &output {
                Some(path) => write_html_report(&session_id, &report, Some(&summary), path)?,
                None => println!("{}", generate_html(&session_id, &report, Some(&summary))),
            }
        }
        "markdown" | "md" => emit(&report.to_markdown(), output.as_deref())?,
        "text" => emit(&render_table(&report), output.as_deref())?,
        other => anyhow::bail!("unknown format: {other} (expected text, json, markdown or html)"),
    }

    if let Some(path) = &output {
        eprintln!("Report written to {}", path.display());
    }
    Ok(())
}

fn emit(rendered: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, rendered)
                .with_context(|| format!("failed to write report to {}", path.display()))?;
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

fn render_table(report: &FinalReport) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Category", "Score"]);
    for (category, score) in &report.categories {
        table.add_row(vec![Cell::new(category), Cell::new(score)]);
    }
    table.add_row(vec![Cell::new("Overall"), Cell::new(report.overall)]);

    let mut out = format!("{table}\n");
    if let Some((category, score)) = report.weakest() {
        out.push_str(&format!("\nFocus area: {category} ({score}/100)\n"));
    }
    if !report.plan.is_empty() {
        out.push_str("\nStudy plan:\n");
        for step in &report.plan {
            out.push_str(&format!("  {step}\n"));
        }
    }
    out
}

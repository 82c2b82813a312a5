//! HTML report generator.
//!
//! Produces a self-contained HTML page with the CSS inlined.

use anyhow::{Context, Result};
use std::path::Path;

use mockview_core::report::{Category, FinalReport, RoundSummary};

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Color band for a 0..=100 score.
fn score_class(score: u32) -> &'static str {
    if score >= 80 {
        "good"
    } else if score >= 60 {
        "fair"
    } else {
        "weak"
    }
}

/// Generate an HTML page for a session's final report.
///
/// The round summary, when given, is rendered as a strengths/mistakes/tips
/// section under the category scores.
pub fn generate_html(
    session_id: &str,
    report: &FinalReport,
    summary: Option<&RoundSummary>,
) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>Interview report: {}</title>\n",
        html_escape(session_id)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    html.push_str("<header>\n");
    html.push_str("<h1>Interview report</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">Session <strong>{}</strong> | generated {}</p>\n",
        html_escape(session_id),
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str(&format!(
        "<p class=\"overall {}\">Overall: {}/100</p>\n",
        score_class(report.overall),
        report.overall
    ));
    html.push_str("</header>\n");

    html.push_str("<section class=\"categories\">\n");
    html.push_str("<h2>Categories</h2>\n");
    html.push_str("<table>\n<thead><tr><th>Category</th><th>Score</th></tr></thead>\n<tbody>\n");
    for (category, score) in &report.categories {
        html.push_str(&format!(
            "<tr><td>{}</td><td class=\"{}\">{}</td></tr>\n",
            category,
            score_class(*score),
            score
        ));
    }
    html.push_str("</tbody></table>\n");
    if !report.categories.is_empty() {
        html.push_str(&generate_bar_chart(report));
    }
    html.push_str("</section>\n");

    if let Some(summary) = summary {
        html.push_str("<section class=\"summary\">\n");
        html.push_str(&format!("<h2>Rounds so far: {}/100</h2>\n", summary.score));
        push_list(&mut html, "Strengths", &summary.strengths);
        push_list(&mut html, "Mistakes", &summary.mistakes);
        push_list(&mut html, "Tips", &summary.tips);
        html.push_str("</section>\n");
    }

    if !report.plan.is_empty() {
        html.push_str("<section class=\"plan\">\n<h2>Study plan</h2>\n<ol>\n");
        for step in &report.plan {
            html.push_str(&format!("<li>{}</li>\n", html_escape(step)));
        }
        html.push_str("</ol>\n</section>\n");
    }

    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(&html_escape(
        &serde_json::to_string_pretty(report).unwrap_or_default(),
    ));
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("</body>\n</html>");
    html
}

fn push_list(html: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    html.push_str(&format!("<h3>{title}</h3>\n<ul>\n"));
    for item in items {
        html.push_str(&format!("<li>{}</li>\n", html_escape(item)));
    }
    html.push_str("</ul>\n");
}

/// Write an HTML report to a file.
pub fn write_html_report(
    session_id: &str,
    report: &FinalReport,
    summary: Option<&RoundSummary>,
    path: &Path,
) -> Result<()> {
    let html = generate_html(session_id, report, summary);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    Ok(())
}

fn generate_bar_chart(report: &FinalReport) -> String {
    let bar_height = 28;
    let max_width = 400;
    let padding = 10;
    let label_width = 140;

    let rows: Vec<(Category, u32)> = report
        .categories
        .iter()
        .map(|(c, s)| (*c, (*s).min(100)))
        .collect();
    let total_height = rows.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, (category, score)) in rows.iter().enumerate() {
        let y = i * (bar_height + padding) + padding;
        let width = *score as usize * max_width / 100;
        let color = match score_class(*score) {
            "good" => "#22c55e",
            "fair" => "#eab308",
            _ => "#ef4444",
        };

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            category
        ));
        svg.push_str(&format!(
            "  <rect x=\"{label_width}\" y=\"{y}\" width=\"{width}\" height=\"{bar_height}\" fill=\"{color}\" rx=\"4\"/>\n"
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{}</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            score
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --good: #dcfce7; --fair: #fef9c3; --weak: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --good: #064e3b; --fair: #713f12; --weak: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; max-width: 60rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
.overall { display: inline-block; padding: 0.5rem 1rem; border-radius: 8px; font-size: 1.25rem; font-weight: bold; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); }
.good { background: var(--good); }
.fair { background: var(--fair); }
.weak { background: var(--weak); }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;

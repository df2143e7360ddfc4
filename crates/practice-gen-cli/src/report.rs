//! Human-readable summary of a composed problem set

use std::path::Path;

use colored::Colorize;

use practice_gen_core::{ComposeReport, ValidatedSelection};

/// Headline plus one line per notable category
pub fn summary_lines(selection: &ValidatedSelection, report: &ComposeReport) -> Vec<String> {
    let mut lines = Vec::new();

    match selection {
        ValidatedSelection::AllCategories => {
            lines.push(
                "Created a problem set that has all problems in all categories"
                    .green()
                    .to_string(),
            );
        }
        ValidatedSelection::AllExcept(excluded) => {
            lines.push(
                "Created a problem set that has all problems in all categories except:"
                    .green()
                    .to_string(),
            );
            for name in excluded {
                lines.push(format!("  {} {}", "-".green(), name.cyan()));
            }
        }
        ValidatedSelection::PerCategory(_) => {
            lines.push(
                "Created a problem set that has randomized problems:"
                    .green()
                    .to_string(),
            );
            for outcome in report.categories.iter().filter(|c| !c.problems.is_empty()) {
                let n = outcome.problems.len();
                let noun = if n == 1 { "problem" } else { "problems" };
                lines.push(format!(
                    "  {} {}",
                    format!("{} {} of the", n, noun).green(),
                    format!("{} {}", outcome.category.cyan(), "category".green())
                ));
            }
        }
    }

    lines
}

pub fn next_steps(output: &Path) -> Vec<String> {
    let name = output
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| output.display().to_string());

    vec![
        format!(
            "1. {} into the {} folder ({}).",
            "cd".yellow(),
            name.blue(),
            output.display()
        ),
        format!(
            "2. Open the {} folder in your editor. You should see two folders called {} and {}.",
            name.blue(),
            "problems".blue(),
            "test".blue()
        ),
        format!(
            "3. Implement the problems in the {} folder and run the specs in {} to check them.",
            "problems".blue(),
            "test".blue()
        ),
    ]
}

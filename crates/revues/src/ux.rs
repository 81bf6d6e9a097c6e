use console::style;

use revues_core::report::{RunReport, StepOutcome};

pub fn present_error(error: anyhow::Error) {
    let error_text = style("ERROR:").red().bold();
    eprintln!("\n{error_text} {error}");
}

/// One line per step, failure details indented beneath, then a summary.
pub fn present_report(report: &RunReport) {
    for step in &report.steps {
        let label = format!("{:>7}", step.outcome.label());
        let label = match &step.outcome {
            StepOutcome::Passed => style(label).green().bold(),
            StepOutcome::Blocked(_) => style(label).yellow().bold(),
            StepOutcome::Failed(_) | StepOutcome::Error(_) => style(label).red().bold(),
        };
        println!("{label}  {} ({:?})", step.name, step.elapsed);
        match &step.outcome {
            StepOutcome::Passed => {}
            StepOutcome::Failed(failures) => {
                for failure in failures {
                    println!("         - {failure}");
                }
            }
            StepOutcome::Blocked(reason) | StepOutcome::Error(reason) => {
                println!("         - {reason}");
            }
        }
    }

    let wall = report.finished_at - report.started_at;
    let summary = format!(
        "{} passed, {} failed in {:.2}s",
        report.passed(),
        report.failed(),
        wall.num_milliseconds() as f64 / 1000.0
    );
    println!("{}", style(summary).dim());
}

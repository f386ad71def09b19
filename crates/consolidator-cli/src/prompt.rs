//! Interactive column decision.

use std::io::{self, BufRead, Write};

use consolidator_core::DecisionPolicy;
use consolidator_model::{MismatchReport, ReconciliationDecision};

/// Asks on a terminal whether to keep the additional columns.
///
/// Only `y` or `yes` (any case) selects the union. Anything else, including
/// an empty answer or a read failure, keeps the common columns.
pub struct PromptPolicy<R, W> {
    input: R,
    output: W,
}

impl PromptPolicy<io::StdinLock<'static>, io::Stderr> {
    /// Prompts on stderr and reads the answer from stdin.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> PromptPolicy<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, report: &MismatchReport) -> io::Result<String> {
        writeln!(self.output)?;
        writeln!(self.output, "Found different headers across files:")?;
        for file in report.files_with_extra() {
            writeln!(
                self.output,
                "  {}: additional columns: {}",
                file.file,
                file.extra.join(", ")
            )?;
        }
        write!(
            self.output,
            "Would you like to include these new columns? [y/N]: "
        )?;
        self.output.flush()?;

        let mut answer = String::new();
        self.input.read_line(&mut answer)?;
        Ok(answer)
    }
}

impl<R: BufRead, W: Write> DecisionPolicy for PromptPolicy<R, W> {
    fn decide(&mut self, report: &MismatchReport) -> ReconciliationDecision {
        match self.ask(report) {
            Ok(answer) => parse_answer(&answer),
            Err(error) => {
                tracing::warn!(%error, "could not read answer, keeping common columns");
                ReconciliationDecision::UseCommon
            }
        }
    }
}

fn parse_answer(answer: &str) -> ReconciliationDecision {
    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" => ReconciliationDecision::UseUnion,
        _ => ReconciliationDecision::UseCommon,
    }
}

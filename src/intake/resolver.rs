//! Operator decisions.
//!
//! Two steps of the pipeline may need a human: confirming a value/extent
//! pair found in free text, and picking a funding organization when the
//! divisions match no family. Both go through the [`Resolver`] trait so the
//! pipeline itself never touches a terminal.

use std::io::{BufRead, Write};

use tracing::warn;

use super::ValueExtentCandidate;

/// Answers the questions the pipeline cannot settle on its own.
pub trait Resolver {
    /// Returns true to accept a value/extent pair found in free text.
    fn confirm_value_extent(&mut self, candidate: &ValueExtentCandidate) -> bool;

    /// Picks one of `options` for a document whose `divisions` matched no
    /// family, or `None` to leave it undetermined.
    fn select_funding_org(&mut self, divisions: &[String], options: &[&str]) -> Option<usize>;
}

/// Declines every question. Used by the HTTP API and unattended batches.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessResolver;

impl Resolver for HeadlessResolver {
    fn confirm_value_extent(&mut self, _candidate: &ValueExtentCandidate) -> bool {
        false
    }

    fn select_funding_org(&mut self, _divisions: &[String], _options: &[&str]) -> Option<usize> {
        None
    }
}

/// Asks on a line-oriented console.
///
/// `y` or `yes` (any case) accepts a candidate; anything else declines.
/// Organization selection takes a 1-based option number, re-prompts on
/// anything else and treats an empty line as declining. There is no
/// timeout. A read or write failure declines.
///
/// # Example
///
/// ```
/// use award_intake::intake::{ConsoleResolver, Resolver};
///
/// let mut output = Vec::new();
/// let mut resolver = ConsoleResolver::new("abc\n2\n".as_bytes(), &mut output);
/// let choice = resolver.select_funding_org(&["XYZ".to_string()], &["AAA-000", "BBB-000"]);
/// assert_eq!(choice, Some(1));
/// ```
#[derive(Debug)]
pub struct ConsoleResolver<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsoleResolver<R, W> {
    /// Creates a resolver reading answers from `input` and writing prompts to `output`.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn read_answer(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim().to_string()),
            Err(e) => {
                warn!(error = %e, "Console read failed");
                None
            }
        }
    }

    fn prompt(&mut self, text: &str) -> bool {
        let result = write!(self.output, "{}", text).and_then(|_| self.output.flush());
        if let Err(e) = result {
            warn!(error = %e, "Console write failed");
            return false;
        }
        true
    }
}

impl<R: BufRead, W: Write> Resolver for ConsoleResolver<R, W> {
    fn confirm_value_extent(&mut self, candidate: &ValueExtentCandidate) -> bool {
        let text = format!(
            "\nValue/extent found in text:\n    ...{}...\nUse {}? [y/N] ",
            candidate.excerpt, candidate.value_extent
        );
        if !self.prompt(&text) {
            return false;
        }
        matches!(
            self.read_answer().map(|a| a.to_ascii_lowercase()).as_deref(),
            Some("y") | Some("yes")
        )
    }

    fn select_funding_org(&mut self, divisions: &[String], options: &[&str]) -> Option<usize> {
        let mut text = format!(
            "\nNo funding organization matches divisions: {}\n",
            divisions.join(", ")
        );
        for (index, option) in options.iter().enumerate() {
            text.push_str(&format!("  {}. {}\n", index + 1, option));
        }
        if !self.prompt(&text) {
            return None;
        }

        loop {
            if !self.prompt("Select an organization (blank to skip): ") {
                return None;
            }
            let answer = self.read_answer()?;
            if answer.is_empty() {
                return None;
            }
            match answer.parse::<usize>() {
                Ok(choice) if (1..=options.len()).contains(&choice) => return Some(choice - 1),
                _ => {
                    if !self.prompt(&format!("Invalid selection '{}'\n", answer)) {
                        return None;
                    }
                }
            }
        }
    }
}

use std::fmt::Display;
use std::io::{self, BufRead, Write};

use tsbank_core::{Amount, Decimal};

/// Client-side rejection of a typed amount, shown before the ledger is called.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AmountInputError {
    #[error("please enter a valid amount")]
    Invalid,
    #[error("amount must be greater than zero")]
    NotPositive,
}

/// Accepts `12.50` and `12,50`.
pub fn parse_amount(raw: &str) -> Result<Amount, AmountInputError> {
    let normalized = raw.trim().replace(',', ".");
    let amount: Amount = normalized.parse().map_err(|_| AmountInputError::Invalid)?;
    if amount <= Decimal::ZERO {
        return Err(AmountInputError::NotPositive);
    }
    Ok(amount)
}

fn is_quit(answer: &str) -> bool {
    answer.eq_ignore_ascii_case("q") || answer.eq_ignore_ascii_case("quit")
}

pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, line: impl Display) -> io::Result<()> {
        writeln!(self.output, "{line}")
    }

    /// Print `label` and read one trimmed answer. `None` means the user
    /// quit (`q`/`quit`) or input ended.
    pub fn ask(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let answer = line.trim();
        if is_quit(answer) {
            return Ok(None);
        }
        Ok(Some(answer.to_owned()))
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

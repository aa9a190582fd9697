//! Interactive company selection

use deckbot_core::CompanyRef;
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PickerError {
    #[error("No companies to choose from")]
    NoCompanies,

    #[error("Input ended before a company was selected")]
    EndOfInput,

    #[error("Terminal I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Numbered company menu over any input and output stream
pub struct CompanyPicker<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> CompanyPicker<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print the menu and read choices until one is valid
    pub fn select<'c>(&mut self, companies: &'c [CompanyRef]) -> Result<&'c CompanyRef, PickerError> {
        if companies.is_empty() {
            return Err(PickerError::NoCompanies);
        }

        writeln!(self.output, "Enter a Number to select a Company")?;
        for (idx, company) in companies.iter().enumerate() {
            writeln!(self.output, "[{}] - {}", idx + 1, company.name)?;
        }

        loop {
            write!(self.output, "Enter Selection: ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(PickerError::EndOfInput);
            }

            let choice = line.trim();
            match choice.parse::<usize>() {
                Ok(n) if (1..=companies.len()).contains(&n) => return Ok(&companies[n - 1]),
                Ok(_) => writeln!(
                    self.output,
                    "Please enter a number between 1 and {}",
                    companies.len()
                )?,
                Err(_) => writeln!(self.output, "'{choice}' is not a number, please try again")?,
            }
        }
    }

    /// Hand back the output stream
    pub fn into_output(self) -> W {
        self.output
    }
}

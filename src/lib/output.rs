use super::error::{ErrorTree, ValidationError};
use serde::Serialize;
use serde_json::to_string;
use std::error::Error;
use std::io::Write;

pub trait Output {
    fn write_text(&self, writer: &mut dyn Write) -> Result<(), Box<dyn Error>>;
    fn write_json_lines(&self, writer: &mut dyn Write) -> Result<(), Box<dyn Error>>;
}

/// The outcome of validating one named input.
#[derive(Debug)]
pub struct Report {
    pub source: String,
    pub result: Result<(), ErrorTree>,
}

impl Report {
    pub fn new(source: impl Into<String>, result: Result<(), ErrorTree>) -> Self {
        Report {
            source: source.into(),
            result,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.result.is_ok()
    }

    /// Keeps at most `max` errors.
    pub fn limit(mut self, max: usize) -> Self {
        if let Err(errors) = &mut self.result {
            errors.truncate(max);
        }
        self
    }

    fn errors(&self) -> &[ValidationError] {
        match &self.result {
            Ok(()) => &[],
            Err(errors) => errors.errors(),
        }
    }
}

#[derive(Serialize)]
struct JSONReport<'a> {
    source: &'a str,
    valid: bool,
    errors: &'a [ValidationError],
}

impl Output for Report {
    fn write_text(&self, writer: &mut dyn Write) -> Result<(), Box<dyn Error>> {
        if self.is_valid() {
            writeln!(writer, "{}: ok", self.source)?;
        } else if self.errors().is_empty() {
            writeln!(writer, "{}: invalid", self.source)?;
        }
        for error in self.errors() {
            writeln!(writer, "{}: {}", self.source, error)?;
        }
        Ok(())
    }

    fn write_json_lines(&self, writer: &mut dyn Write) -> Result<(), Box<dyn Error>> {
        let report = JSONReport {
            source: &self.source,
            valid: self.is_valid(),
            errors: self.errors(),
        };
        let json = to_string(&report)?;
        writeln!(writer, "{}", json)?;
        Ok(())
    }
}

impl Output for Vec<Report> {
    fn write_text(&self, writer: &mut dyn Write) -> Result<(), Box<dyn Error>> {
        for report in self.iter() {
            report.write_text(writer)?;
        }
        Ok(())
    }

    fn write_json_lines(&self, writer: &mut dyn Write) -> Result<(), Box<dyn Error>> {
        for report in self.iter() {
            report.write_json_lines(writer)?;
        }
        Ok(())
    }
}

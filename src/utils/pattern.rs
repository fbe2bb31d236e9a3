use crate::utils::errors::{CsvGumError, Result};
use regex::{Captures, Regex};

/// A compiled lookup pattern.
///
/// When the pattern has capture groups, each match yields the text of the first
/// group (empty when that group did not participate), otherwise the whole match.
#[derive(Debug, Clone)]
pub struct PatternFinder {
    regex: Regex,
}

impl PatternFinder {
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self {
            regex: Regex::new(pattern)?,
        })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn find(&self, text: &str) -> Result<String> {
        self.regex
            .captures(text)
            .map(|caps| self.extract(&caps))
            .ok_or_else(|| CsvGumError::NoMatch(self.as_str().to_string()))
    }

    pub fn find_all(&self, text: &str) -> Vec<String> {
        self.regex
            .captures_iter(text)
            .map(|caps| self.extract(&caps))
            .collect()
    }

    fn extract(&self, caps: &Captures<'_>) -> String {
        let group = if self.regex.captures_len() > 1 { 1 } else { 0 };
        caps.get(group)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    }
}

pub fn find_pattern(pattern: &str, text: &str) -> Result<String> {
    PatternFinder::new(pattern)?.find(text)
}

pub fn find_all(pattern: &str, text: &str) -> Result<Vec<String>> {
    Ok(PatternFinder::new(pattern)?.find_all(text))
}

use crate::utils::errors::{CsvGumError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub reader: ReaderOptions,
    pub writer: WriterOptions,
    pub walker: WalkerOptions,
    pub logging: LoggingConfig,
}

/// Field separation and quoting rules shared by the reader and the writer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dialect {
    pub delimiter: char,
    pub quote: char,
    /// Whether a doubled quote inside a quoted field stands for one quote.
    pub double_quote: bool,
    pub escape: Option<char>,
    /// Lines starting with this character are skipped when reading.
    pub comment: Option<char>,
    /// Trim surrounding whitespace from headers and fields when reading.
    pub trim: bool,
}

impl Default for Dialect {
    fn default() -> Self {
        Self {
            delimiter: ',',
            quote: '"',
            double_quote: true,
            escape: None,
            comment: None,
            trim: false,
        }
    }
}

impl Dialect {
    pub fn tab() -> Self {
        Self {
            delimiter: '\t',
            ..Self::default()
        }
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub(crate) fn delimiter_byte(&self) -> Result<u8> {
        dialect_byte("delimiter", self.delimiter)
    }

    pub(crate) fn quote_byte(&self) -> Result<u8> {
        dialect_byte("quote", self.quote)
    }

    pub(crate) fn escape_byte(&self) -> Result<Option<u8>> {
        self.escape.map(|c| dialect_byte("escape", c)).transpose()
    }

    pub(crate) fn comment_byte(&self) -> Result<Option<u8>> {
        self.comment.map(|c| dialect_byte("comment", c)).transpose()
    }

    pub fn validate(&self) -> Result<()> {
        let delimiter = self.delimiter_byte()?;
        let quote = self.quote_byte()?;
        if delimiter == quote {
            return Err(CsvGumError::Config(format!(
                "delimiter and quote must differ, both are {:?}",
                self.delimiter
            )));
        }
        self.escape_byte()?;
        self.comment_byte()?;
        Ok(())
    }
}

fn dialect_byte(name: &str, c: char) -> Result<u8> {
    if c.is_ascii() && c != '\n' && c != '\r' {
        Ok(c as u8)
    } else {
        Err(CsvGumError::Config(format!(
            "{} must be a single ASCII character other than a line break, got {:?}",
            name, c
        )))
    }
}

/// What the reader does with a record whose field count differs from the header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowLengthPolicy {
    #[default]
    Reject,
    /// Fill missing trailing cells; longer records are still rejected.
    Pad,
    /// Drop surplus trailing cells; shorter records are still rejected.
    Truncate,
    /// Pad short records and truncate long ones.
    Fit,
}

impl RowLengthPolicy {
    pub fn pads(self) -> bool {
        matches!(self, Self::Pad | Self::Fit)
    }

    pub fn truncates(self) -> bool {
        matches!(self, Self::Truncate | Self::Fit)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderOptions {
    pub dialect: Dialect,
    /// Explicit header. When set, the first line of the file is read as data.
    pub fieldnames: Option<Vec<String>>,
    pub row_length: RowLengthPolicy,
    pub fill_value: String,
}

impl ReaderOptions {
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn with_fieldnames<I, S>(mut self, fieldnames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fieldnames = Some(fieldnames.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_row_length(mut self, policy: RowLengthPolicy) -> Self {
        self.row_length = policy;
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtrasAction {
    #[default]
    Ignore,
    Raise,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStyle {
    #[default]
    Necessary,
    Always,
    NonNumeric,
    Never,
}

impl From<QuoteStyle> for csv::QuoteStyle {
    fn from(style: QuoteStyle) -> Self {
        match style {
            QuoteStyle::Necessary => csv::QuoteStyle::Necessary,
            QuoteStyle::Always => csv::QuoteStyle::Always,
            QuoteStyle::NonNumeric => csv::QuoteStyle::NonNumeric,
            QuoteStyle::Never => csv::QuoteStyle::Never,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineTerminator {
    #[default]
    Lf,
    Crlf,
}

impl From<LineTerminator> for csv::Terminator {
    fn from(terminator: LineTerminator) -> Self {
        match terminator {
            LineTerminator::Lf => csv::Terminator::Any(b'\n'),
            LineTerminator::Crlf => csv::Terminator::CRLF,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterOptions {
    pub dialect: Dialect,
    /// Written in place of a header column the row does not have.
    pub rest_value: String,
    pub extras_action: ExtrasAction,
    pub quote_style: QuoteStyle,
    pub line_terminator: LineTerminator,
    pub sanitize_formulas: bool,
}

impl WriterOptions {
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn with_rest_value(mut self, rest_value: impl Into<String>) -> Self {
        self.rest_value = rest_value.into();
        self
    }

    pub fn with_extras_action(mut self, action: ExtrasAction) -> Self {
        self.extras_action = action;
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkerOptions {
    pub files_only: bool,
    pub sorted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl AppConfig {
    pub fn load_from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CsvGumError::Config(format!("{}: {}", path, e)))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| CsvGumError::Config(e.to_string()))?;
        config.reader.dialect.validate()?;
        config.writer.dialect.validate()?;
        Ok(config)
    }

    pub fn load_or_default(path: Option<&str>) -> Self {
        match path {
            Some(p) => Self::load_from_file(p).unwrap_or_else(|e| {
                tracing::debug!(path = p, error = %e, "Using default configuration");
                Self::default()
            }),
            None => Self::default(),
        }
    }
}

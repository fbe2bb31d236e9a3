pub mod config;
pub mod errors;
pub mod pattern;
pub mod projection;

pub use config::{
    AppConfig, Dialect, ExtrasAction, LineTerminator, LoggingConfig, QuoteStyle, ReaderOptions,
    RowLengthPolicy, WalkerOptions, WriterOptions,
};
pub use errors::{CsvGumError, Result};
pub use pattern::{find_all, find_pattern, PatternFinder};
pub use projection::{project_keys, Projection};

/// Guards spreadsheet consumers against cells that would be evaluated as formulas.
pub fn sanitize_cell(value: &str) -> String {
    if value.starts_with('=')
        || value.starts_with('+')
        || value.starts_with('-')
        || value.starts_with('@')
    {
        format!("'{}", value)
    } else {
        value.to_string()
    }
}

/// Default file filter: keeps every name.
pub fn accept_all(_name: &str) -> bool {
    true
}

/// Appends `newline` to every item, producing lines ready to be written to a text file.
pub fn to_plain_lines<I>(items: I, newline: &str) -> impl Iterator<Item = String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let newline = newline.to_string();
    items.into_iter().map(move |item| {
        let item = item.as_ref();
        let mut line = String::with_capacity(item.len() + newline.len());
        line.push_str(item);
        line.push_str(&newline);
        line
    })
}

use crate::table::fold::fold;
use crate::table::Row;
use crate::utils::{CsvGumError, ReaderOptions, Result, RowLengthPolicy};
use csv::StringRecord;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Handle on a delimited table file.
///
/// Every operation opens the file afresh and releases it before returning (or,
/// for [`TableReader::iter_rows`], when the iterator is dropped), so one handle can
/// be read any number of times.
#[derive(Debug, Clone)]
pub struct TableReader {
    path: PathBuf,
    options: ReaderOptions,
}

impl TableReader {
    pub fn open(path: impl AsRef<Path>, options: ReaderOptions) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(CsvGumError::FileNotFound(path.display().to_string()));
        }
        options.dialect.validate()?;

        Ok(Self {
            path: path.to_path_buf(),
            options,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn options(&self) -> &ReaderOptions {
        &self.options
    }

    /// Column names: the configured override, else the first record of the file.
    pub fn headers(&self) -> Result<Vec<String>> {
        if let Some(names) = &self.options.fieldnames {
            return Ok(names.clone());
        }
        let mut reader = self.csv_reader()?;
        Ok(record_to_vec(reader.headers()?))
    }

    pub fn iter_rows(&self) -> Result<RowIter> {
        let mut reader = self.csv_reader()?;
        let columns = match &self.options.fieldnames {
            Some(names) => names.clone(),
            None => record_to_vec(reader.headers()?),
        };

        if let Some(duplicate) = first_duplicate(&columns) {
            warn!(
                path = %self.path.display(),
                column = %duplicate,
                "Duplicate column name, later values overwrite earlier ones"
            );
        }
        debug!(path = %self.path.display(), columns = columns.len(), "Opened table");

        Ok(RowIter {
            path: self.path.display().to_string(),
            records: reader.into_records(),
            columns,
            policy: self.options.row_length,
            fill_value: self.options.fill_value.clone(),
        })
    }

    pub fn read_rows(&self) -> Result<Vec<Row>> {
        let rows = self.iter_rows()?.collect::<Result<Vec<_>>>()?;
        info!(path = %self.path.display(), rows = rows.len(), "Read table");
        Ok(rows)
    }

    /// Folds `procedure(row, accumulator)` over every row in file order.
    pub fn fold_rows<A, E, F>(&self, init: A, procedure: F) -> std::result::Result<A, E>
    where
        F: FnMut(Row, A) -> std::result::Result<A, E>,
        E: From<CsvGumError>,
    {
        fold(self.iter_rows()?, init, procedure)
    }

    pub fn count_rows(&self) -> Result<usize> {
        self.fold_rows(0, |_, count| Ok(count + 1))
    }

    fn csv_reader(&self) -> Result<csv::Reader<File>> {
        let file = File::open(&self.path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                CsvGumError::FileNotFound(self.path.display().to_string())
            }
            _ => CsvGumError::IoError(e),
        })?;

        let dialect = &self.options.dialect;
        let trim = if dialect.trim {
            csv::Trim::All
        } else {
            csv::Trim::None
        };

        Ok(csv::ReaderBuilder::new()
            .delimiter(dialect.delimiter_byte()?)
            .quote(dialect.quote_byte()?)
            .double_quote(dialect.double_quote)
            .escape(dialect.escape_byte()?)
            .comment(dialect.comment_byte()?)
            .trim(trim)
            .has_headers(self.options.fieldnames.is_none())
            .flexible(true)
            .from_reader(file))
    }
}

/// Single-pass iterator over the rows of one table file.
pub struct RowIter {
    path: String,
    records: csv::StringRecordsIntoIter<File>,
    columns: Vec<String>,
    policy: RowLengthPolicy,
    fill_value: String,
}

impl RowIter {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    fn build_row(&self, record: StringRecord) -> Result<Row> {
        let expected = self.columns.len();
        let found = record.len();

        if found != expected {
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            let tolerated = (found < expected && self.policy.pads())
                || (found > expected && self.policy.truncates());
            if !tolerated {
                return Err(CsvGumError::MalformedRow {
                    path: self.path.clone(),
                    line,
                    expected,
                    found,
                });
            }
            warn!(path = %self.path, line, expected, found, "Adjusted row length");
        }

        Ok(self
            .columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                let value = record.get(i).unwrap_or(self.fill_value.as_str());
                (column.clone(), value.to_string())
            })
            .collect())
    }
}

impl Iterator for RowIter {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.records.next()? {
            Ok(record) => Some(self.build_row(record)),
            Err(e) => Some(Err(CsvGumError::CsvError(e))),
        }
    }
}

fn record_to_vec(record: &StringRecord) -> Vec<String> {
    record.iter().map(|s| s.to_string()).collect()
}

fn first_duplicate(columns: &[String]) -> Option<&str> {
    columns
        .iter()
        .enumerate()
        .find(|(i, column)| columns[..*i].contains(*column))
        .map(|(_, column)| column.as_str())
}

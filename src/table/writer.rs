use crate::table::Row;
use crate::utils::{sanitize_cell, CsvGumError, ExtrasAction, Result, WriterOptions};
use csv::Writer;
use std::borrow::Borrow;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

pub struct TableWriter {
    path: String,
    header: Vec<String>,
    options: WriterOptions,
    writer: Writer<File>,
    rows_written: usize,
}

impl TableWriter {
    /// Creates (or truncates) `path` and writes the header line.
    pub fn create<H>(path: impl AsRef<Path>, header: H, options: WriterOptions) -> Result<Self>
    where
        H: IntoIterator,
        H::Item: Into<String>,
    {
        let path_ref = path.as_ref();
        let path = path_ref.display().to_string();
        let header: Vec<String> = header.into_iter().map(Into::into).collect();
        let dialect = &options.dialect;
        dialect.validate()?;

        let mut builder = csv::WriterBuilder::new();
        builder
            .delimiter(dialect.delimiter_byte()?)
            .quote(dialect.quote_byte()?)
            .double_quote(dialect.double_quote)
            .quote_style(options.quote_style.into())
            .terminator(options.line_terminator.into());
        if let Some(escape) = dialect.escape_byte()? {
            builder.escape(escape);
        }

        let file = File::create(path_ref).map_err(|e| CsvGumError::write_error(&path, e))?;
        let mut writer = builder.from_writer(file);
        writer
            .write_record(&header)
            .map_err(|e| CsvGumError::from_csv_write(&path, e))?;

        debug!(path = %path, columns = header.len(), "Created table");

        Ok(Self {
            path,
            header,
            options,
            writer,
            rows_written: 0,
        })
    }

    /// Writes the header columns of `row`, filling absent ones with the rest value.
    pub fn write_row(&mut self, row: &Row) -> Result<()> {
        if self.options.extras_action == ExtrasAction::Raise {
            let extras: Vec<String> = row
                .keys()
                .filter(|key| !self.header.contains(*key))
                .cloned()
                .collect();
            if !extras.is_empty() {
                return Err(CsvGumError::UnexpectedColumns {
                    path: self.path.clone(),
                    columns: extras,
                });
            }
        }

        let record: Vec<String> = self
            .header
            .iter()
            .map(|column| {
                let value = row
                    .get(column)
                    .map(String::as_str)
                    .unwrap_or(self.options.rest_value.as_str());
                if self.options.sanitize_formulas {
                    sanitize_cell(value)
                } else {
                    value.to_string()
                }
            })
            .collect();

        self.writer
            .write_record(&record)
            .map_err(|e| CsvGumError::from_csv_write(&self.path, e))?;
        self.rows_written += 1;
        Ok(())
    }

    pub fn write_rows<I, R>(&mut self, rows: I) -> Result<()>
    where
        I: IntoIterator<Item = R>,
        R: Borrow<Row>,
    {
        for row in rows {
            self.write_row(row.borrow())?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|e| CsvGumError::write_error(&self.path, e))
    }

    /// Flushes and closes the file, returning the number of data rows written.
    pub fn finish(mut self) -> Result<usize> {
        self.flush()?;
        info!(path = %self.path, rows = self.rows_written, "Wrote table");
        Ok(self.rows_written)
    }

    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Writes `header` then every row of `rows` to `path`, returning the number of rows written.
pub fn write_table<I, R, H>(
    path: impl AsRef<Path>,
    rows: I,
    header: H,
    options: &WriterOptions,
) -> Result<usize>
where
    I: IntoIterator<Item = R>,
    R: Borrow<Row>,
    H: IntoIterator,
    H::Item: Into<String>,
{
    let mut writer = TableWriter::create(path, header, options.clone())?;
    writer.write_rows(rows)?;
    writer.finish()
}

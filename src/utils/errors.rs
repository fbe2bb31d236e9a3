use thiserror::Error;

#[derive(Error, Debug)]
pub enum CsvGumError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Directory not found: {0}")]
    DirectoryNotFound(String),

    #[error("Malformed row in {path} at line {line}: expected {expected} fields, found {found}")]
    MalformedRow {
        path: String,
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("Key not found: {0}")]
    KeyNotFound(String),

    #[error("No match for pattern: {0}")]
    NoMatch(String),

    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Write error on {path}: {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Unexpected columns in row written to {path}: {columns:?}")]
    UnexpectedColumns { path: String, columns: Vec<String> },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CsvGumError {
    pub fn write_error(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::WriteError {
            path: path.into(),
            source,
        }
    }

    /// Io failures from the csv writer become `WriteError`; anything else stays a `CsvError`.
    pub(crate) fn from_csv_write(path: &str, err: csv::Error) -> Self {
        if !err.is_io_error() {
            return Self::CsvError(err);
        }
        match err.into_kind() {
            csv::ErrorKind::Io(source) => Self::write_error(path, source),
            other => Self::write_error(path, std::io::Error::other(format!("{:?}", other))),
        }
    }
}

pub type Result<T> = std::result::Result<T, CsvGumError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_row_message_names_path_and_counts() {
        let err = CsvGumError::MalformedRow {
            path: "data.csv".to_string(),
            line: 3,
            expected: 2,
            found: 3,
        };
        assert_eq!(
            err.to_string(),
            "Malformed row in data.csv at line 3: expected 2 fields, found 3"
        );
    }

    #[test]
    fn csv_io_failure_becomes_write_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = CsvGumError::from_csv_write("out.csv", csv::Error::from(io));
        match err {
            CsvGumError::WriteError { path, source } => {
                assert_eq!(path, "out.csv");
                assert_eq!(source.kind(), std::io::ErrorKind::PermissionDenied);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn csv_record_failure_stays_a_csv_error() {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(["a", "b"]).unwrap();
        let csv_err = writer.write_record(["only"]).unwrap_err();

        let err = CsvGumError::from_csv_write("out.csv", csv_err);
        assert!(matches!(err, CsvGumError::CsvError(_)));
    }
}

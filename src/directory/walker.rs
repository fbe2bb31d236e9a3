use crate::table::fold;
use crate::utils::{accept_all, CsvGumError, Result, WalkerOptions};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Folds a procedure over the immediate entries of one directory.
///
/// Entries come in platform listing order unless [`DirectoryWalker::sorted`] is set.
pub struct DirectoryWalker<'f> {
    dir: PathBuf,
    filter: Box<dyn FnMut(&str) -> bool + 'f>,
    files_only: bool,
    sorted: bool,
}

impl<'f> DirectoryWalker<'f> {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            filter: Box::new(accept_all),
            files_only: false,
            sorted: false,
        }
    }

    pub fn with_options(mut self, options: WalkerOptions) -> Self {
        self.files_only = options.files_only;
        self.sorted = options.sorted;
        self
    }

    /// Keeps only entries whose file name satisfies `predicate`.
    pub fn filter<P>(mut self, predicate: P) -> Self
    where
        P: FnMut(&str) -> bool + 'f,
    {
        self.filter = Box::new(predicate);
        self
    }

    /// Skips entries that are not regular files (after following symlinks).
    pub fn files_only(mut self) -> Self {
        self.files_only = true;
        self
    }

    /// Orders entries by file name.
    pub fn sorted(mut self) -> Self {
        self.sorted = true;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Paths of the entries that pass the filter, joined onto the directory.
    pub fn entries(&mut self) -> Result<Vec<PathBuf>> {
        if !self.dir.is_dir() {
            return Err(CsvGumError::DirectoryNotFound(
                self.dir.display().to_string(),
            ));
        }

        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let display_name = name.to_string_lossy().into_owned();

            if self.files_only && !entry.path().is_file() {
                debug!(dir = %self.dir.display(), name = %display_name, "Skipped non-file entry");
                continue;
            }
            if !(self.filter)(&display_name) {
                debug!(dir = %self.dir.display(), name = %display_name, "Filtered out entry");
                continue;
            }
            names.push(name);
        }

        if self.sorted {
            names.sort();
        }

        Ok(names.into_iter().map(|name| self.dir.join(name)).collect())
    }

    /// Folds `procedure(path, accumulator)` over the filtered entries.
    pub fn fold<A, E, F>(mut self, init: A, mut procedure: F) -> std::result::Result<A, E>
    where
        F: FnMut(PathBuf, A) -> std::result::Result<A, E>,
        E: From<CsvGumError>,
    {
        let paths = self.entries()?;
        let total = paths.len();

        let acc = fold(paths.into_iter().map(Ok), init, |path, acc| {
            debug!(path = %path.display(), "Processing entry");
            procedure(path, acc)
        })?;

        info!(dir = %self.dir.display(), entries = total, "Walked directory");
        Ok(acc)
    }
}

/// Folds `procedure` over the entries of `dir` whose names pass `filter`.
pub fn walk_directory<A, E, P, F>(
    dir: impl AsRef<Path>,
    init: A,
    filter: P,
    procedure: F,
) -> std::result::Result<A, E>
where
    P: FnMut(&str) -> bool,
    F: FnMut(PathBuf, A) -> std::result::Result<A, E>,
    E: From<CsvGumError>,
{
    DirectoryWalker::new(dir.as_ref())
        .filter(filter)
        .fold(init, procedure)
}

pub mod directory;
pub mod table;
pub mod utils;

pub use directory::{walk_directory, DirectoryWalker};
pub use table::{fold, write_table, Row, RowIter, TableReader, TableWriter};
pub use utils::{
    accept_all, find_all, find_pattern, project_keys, to_plain_lines, AppConfig, CsvGumError,
    Dialect, ExtrasAction, PatternFinder, Projection, ReaderOptions, Result, RowLengthPolicy,
    WalkerOptions, WriterOptions,
};

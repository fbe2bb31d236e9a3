pub mod fold;
pub mod reader;
pub mod writer;

pub use fold::fold;
pub use reader::{RowIter, TableReader};
pub use writer::{write_table, TableWriter};

/// One data record, keyed by column name in header order.
pub type Row = indexmap::IndexMap<String, String>;

pub mod walker;

pub use walker::{walk_directory, DirectoryWalker};

pub mod file;
pub mod memory;

pub use file::{FileCategorySource, FileSource};
pub use memory::{InMemoryCategorySource, InMemorySource};

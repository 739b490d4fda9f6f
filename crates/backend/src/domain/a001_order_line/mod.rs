pub mod error;
pub mod loader;

pub use error::DataLoadError;
pub use loader::{load_from_path, load_from_reader, Dataset};

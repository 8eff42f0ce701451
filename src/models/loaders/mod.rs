pub mod toml_loader;

pub use toml_loader::{load_profiles, load_qa_table};

pub mod loaders;
pub mod outcome;
pub mod profile;
pub mod qa;

pub use loaders::{load_profiles, load_qa_table};
pub use outcome::{DetectionResult, MatchResult, EXACT_CONFIDENCE, PARTIAL_CONFIDENCE};
pub use profile::{Profile, ProfileSet};
pub use qa::{QaEntry, QaSource, QaStore, QaTable, UnavailableQa};

pub mod detector;
pub mod matcher;
pub mod miss_writer;

pub use detector::{detect, extract_question, extract_question_by_id, qualifies, score_profile};
pub use matcher::{find_answer, find_in_entries, normalize};
pub use miss_writer::MissWriter;

pub mod event;
pub mod session;

pub use event::{CollectSink, LogSink, ResultSink, SessionEvent};
pub use session::Session;

pub mod eval;
pub mod maximize;
pub mod progress;

pub use maximize::{SearchParams, SearchReport, PLY_DEFAULT, PLY_MAX, PLY_MIN};
pub use progress::{AtomicProgress, ProgressSink};

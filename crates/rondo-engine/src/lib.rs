//! Evaluation and search for rondo.

pub mod eval;
pub mod search;

pub use eval::evaluate;
pub use search::draw::DrawContext;
pub use search::tt::{Bound, TranspositionTable};
pub use search::{MATE, MATE_THRESHOLD, SearchOutcome, Searcher, TIME_OUT};

//! Score directors keep a working solution and its score in sync.

pub mod typed;


pub use typed::TypedScoreDirector;

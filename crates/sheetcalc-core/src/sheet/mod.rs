//! Sheet state and logic (UI-agnostic).

mod eval;
mod ops;
mod state;

pub use eval::MAX_EVAL_DEPTH;
pub use state::Sheet;

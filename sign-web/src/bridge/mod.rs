//! Bridge module - JS ↔ Rust communication
//!
//! All #[wasm_bindgen] entry points live here.
//! Re-exports only in mod.rs, logic in submodules.

mod frames;
mod lifecycle;

pub use frames::{clear_session, end_session, get_sentence, process_frame};
pub use lifecycle::{configure, health, init_panic_hook};

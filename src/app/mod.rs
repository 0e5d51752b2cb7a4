// App module - interactive REPL and one-shot mode
pub mod repl;

pub use repl::{run_one_shot, run_repl_mode};

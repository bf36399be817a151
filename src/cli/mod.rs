// CLI module: argument parsing and verbosity
pub mod args;

pub use args::{Args, Commands, Verbosity};

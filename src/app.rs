//! Application module: the folder browser model driven by the TUI.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;

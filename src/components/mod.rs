//! UI components.

pub mod diagram;
pub mod header;

#![doc = include_str!("doc.md")]

pub mod algorithm;
pub mod model;
pub mod util;

// shared mesh fixtures for tests; kept in the library so the app crate and
// integration tests can reuse them
pub mod testing;

//! Utility modules: callback adapter.

pub mod callback;

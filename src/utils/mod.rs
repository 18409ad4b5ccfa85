//! Utility modules: Arrow column helpers, table output, logging and progress

pub mod arrow;
pub mod io;
pub mod logging;

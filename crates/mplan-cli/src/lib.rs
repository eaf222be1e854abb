//! Library side of the `mplan` command-line tool.

pub mod logging;
pub mod pipeline;

//! Library components of the `kodiak` command line tool.

pub mod logging;

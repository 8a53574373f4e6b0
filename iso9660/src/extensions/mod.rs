//! ISO9660 extension areas
//!
//! Rock Ridge and other SUSP-based extensions are detected, not interpreted.

pub mod susp;

pub use susp::{SystemUseArea, SystemUseHeader};

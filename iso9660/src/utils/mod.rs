//! Shared helpers: name decoding, timestamps, block arithmetic

pub mod datetime;
pub mod sector;
pub mod string;

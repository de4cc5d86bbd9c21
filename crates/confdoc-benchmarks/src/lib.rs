//! confdoc benchmarking suite
//!
//! Parse, serialize and edit throughput for every structured format.

pub mod common;

pub use common::*;

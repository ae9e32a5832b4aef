//! Output generation.
//!
//! The sole durable artifact of a run is one spreadsheet file; see
//! [`xlsx`] for the naming rule and column layout.

pub mod xlsx;

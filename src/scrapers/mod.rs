//! Site-specific browser driving.
//!
//! The [`latimes`] module owns every direct WebDriver interaction: session
//! setup, search submission, sort selection, category filtering, and the
//! live [`crate::extract::PageProvider`] implementation. The extraction and
//! termination logic itself lives in [`crate::extract`] and never touches
//! the browser directly.

pub mod latimes;

//! Request middleware.
//!
//! Cross-cutting request lifecycle concerns live here so handlers stay focused
//! on the job board use-cases.

pub mod trace;

pub use trace::Trace;

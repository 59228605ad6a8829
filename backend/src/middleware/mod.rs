//! Request middleware.
//!
//! Purpose: request lifecycle concerns shared by every route. The
//! authorization gate lives with the HTTP adapter because it needs the
//! session.

pub mod trace;

pub use trace::Trace;

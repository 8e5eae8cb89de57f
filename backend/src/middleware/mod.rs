//! Request middleware.
//!
//! Purpose: request lifecycle concerns that sit outside the handlers, namely
//! trace correlation with access logging, and the cross-origin policy.

pub mod cors;
pub mod trace;

pub use cors::AllowOrigin;
pub use trace::Trace;

//! Types shared between the activity core and its front-ends.

pub mod domain;
pub mod error;
pub mod protocol;

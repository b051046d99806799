//! Request handlers, grouped by resource.

pub mod contact;
pub mod news;
pub mod system;

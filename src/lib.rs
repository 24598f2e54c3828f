//! Registration form core: a declarative field schema with a password
//! confirmation rule, a controller that validates on submit, and a live
//! password strength checklist.

pub mod config;
pub mod form;

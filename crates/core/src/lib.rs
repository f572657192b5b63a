//! Shared domain types for the timetable service.
//!
//! This crate holds the wire models exchanged with the frontend, the
//! Monday..Saturday day enumeration, the composite slot addressing scheme,
//! and the error taxonomy used across the workspace. It is deliberately
//! free of any web-framework or database dependency so both the API and
//! repository layers can build on it.

pub mod errors;
pub mod models;

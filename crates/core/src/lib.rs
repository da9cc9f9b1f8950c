//! Core types, pure logic, and state machine for the fieldserve bulk
//! spreadsheet-upload protocol.
//!
//! This crate has zero I/O and zero async. It provides:
//!
//! - Upload kind definitions (endpoint slugs, labels, wire field names)
//! - Pre-upload file validation
//! - Wire types for the NDJSON progress stream
//! - The upload session state machine and the record fold (reducer)
//! - The capped live-update log
//! - Result filtering for the completed view
//! - Static CSV template content

pub mod kind;
pub mod livelog;
pub mod record;
pub mod reducer;
pub mod results;
pub mod session;
pub mod template;
pub mod validate;

//! Modules layer - Infrastructure components for external integrations
//!
//! Contains the record store (reports and match records) and the blob store
//! holding found-item images.

pub mod records;
pub mod storage;

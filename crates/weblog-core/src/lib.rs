//! Core domain types for the weblog analyzer.
//!
//! Shared by the data layer and the CLI binary: the access-record model and
//! its counter-table dimensions, the record-source cursor contract, the
//! workspace error type, CLI settings, and count formatting helpers.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;

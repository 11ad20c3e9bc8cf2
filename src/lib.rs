//! Employee performance scoring.
//!
//! The [`scoring`] engine turns employee work records into ranked employee
//! results and a ranked team comparison. [`ingest`] decodes CSV/Excel uploads
//! into engine rows, and [`server`] exposes both over HTTP.

pub mod config;
pub mod error;
pub mod ingest;
pub mod logging;
pub mod output;
pub mod scoring;
pub mod server;

//! Return-to-office compliance engine.
//!
//! The [`attendance`] module holds the validator itself; `config`, `error` and
//! `telemetry` carry the ambient application plumbing shared with the service
//! crate.

pub mod attendance;
pub mod config;
pub mod error;
pub mod telemetry;

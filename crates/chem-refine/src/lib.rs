//! Core library for the chemical-product data curation service.
//!
//! The interesting part lives in [`workflows::refinement`]: a stateless
//! engine that inspects collected product/ingredient records for data-quality
//! problems, rolls them up into per-product statuses and dashboard stats, and
//! applies deterministic corrections through the record store.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;

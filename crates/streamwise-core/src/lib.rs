//! Core types for the StreamWise analytics seeding and reporting jobs.
//!
//! This crate is deliberately free of database and file-system code. It
//! describes the star schema's rows, generates synthetic usage data, and
//! names the reporting views. Storage backends implement
//! [`store::AnalyticsStore`].

pub mod analytics;
pub mod attributes;
pub mod catalog;
pub mod config;
pub mod dataset;
pub mod error;
pub mod generator;
pub mod store;

pub use error::{Error, Result};

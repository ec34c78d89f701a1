//! Pipeline Inspector library.
//!
//! Records pipelines, their supports and support inspections, and derives
//! dashboard statistics, report data and UI navigation outcomes from them.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod middleware;
pub mod migration;
pub mod models;
pub mod services;

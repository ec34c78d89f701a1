//! API E2E test suite.
//!
//! Drives the full `/api/v1` scope against an in-memory SQLite database
//! migrated per test. No external services are required.
//!
//! Run with: cargo test --test api_e2e


mod test_actions;
mod test_health;
mod test_inspections;
mod test_pipelines;
mod test_supports;

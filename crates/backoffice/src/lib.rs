//! Back-office workflow services for a sports-training marketplace.
//!
//! The library owns the trainer compliance and payout lifecycles behind
//! storage and mail collaborator traits; the `services/api` crate wires the
//! routers, metrics, and CLI around it.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;

//! Clearwater: pool-maintenance service backend.
//!
//! The heart of the crate is [`pools::engine`], a pure function family that
//! turns water-chemistry readings and service-visit records into verdicts,
//! recommendations, quality scores, and weekly grades. Everything around it is
//! plumbing: an intake guard, a storage trait, a service facade, and an axum
//! router so the engine can be exercised over HTTP.

pub mod config;
pub mod error;
pub mod imports;
pub mod pools;
pub mod telemetry;

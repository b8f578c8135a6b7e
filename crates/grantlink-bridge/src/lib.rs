//! Webhook boundary for the grantlink bridge.
//!
//! Owns everything between the HTTP socket and the reconciliation core:
//! environment configuration, request signature verification, and the
//! dispatcher that routes an inbound envelope to the enumerator or the
//! reconciler and maps its outcome to a transport status.
//!
//! Authentication failures and unrecognized envelopes are rejected here
//! and never reach the core; business outcomes always come back as a
//! serializable `status` body, even on failure.

pub mod config;
pub mod routes;
pub mod signature;

pub use config::{BridgeConfig, ConfigError};
pub use routes::{bridge_router, BridgeState};

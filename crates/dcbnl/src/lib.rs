//! Async rtnetlink client for the Linux Data Center Bridging (DCB) subsystem.
//!
//! This crate talks to the kernel's `dcbnl` interface over `NETLINK_ROUTE`
//! and decodes IEEE 802.1Qbb Priority Flow Control (PFC) state and pause
//! frame counters for a network interface.
//!
//! # Features
//!
//! - `output` - `serde::Serialize` for decoded DCB types (JSON output)
//!
//! # Example
//!
//! ```ignore
//! use dcbnl::netlink::{Connection, Route};
//!
//! #[tokio::main]
//! async fn main() -> dcbnl::netlink::Result<()> {
//!     let conn = Connection::<Route>::new()?;
//!
//!     for reply in conn.get_ieee_pfc("eth0").await? {
//!         if let Some(pfc) = reply.ieee_pfc {
//!             println!("pfc_en: {:#04x}", pfc.pfc_en);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod netlink;

// Re-export common types at crate root for convenience
pub use netlink::{Connection, Error, Protocol, Result, Route};

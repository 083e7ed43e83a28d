//! Async netlink protocol implementation for the DCB subsystem.
//!
//! The generic pieces (message header, attribute framing, message builder,
//! socket and connection) follow the rtnetlink wire format; the [`dcb`]
//! module layers the `dcbnl` command set on top of them.
//!
//! # Quick Start
//!
//! ```ignore
//! use dcbnl::netlink::{Connection, Route};
//!
//! let conn = Connection::<Route>::new()?;
//! let replies = conn.get_ieee_pfc("eth0").await?;
//! ```
//!
//! # Decoding without a socket
//!
//! ```ignore
//! use dcbnl::netlink::dcb::ResponseDecoder;
//!
//! // `payload` is one reply message without its nlmsghdr
//! if let Some(reply) = ResponseDecoder::new().decode(payload)? {
//!     println!("{:?}", reply.ifname);
//! }
//! ```

pub mod attr;
mod builder;
pub mod connection;
pub mod dcb;
mod error;
pub mod message;
pub mod protocol;
mod socket;

pub use attr::{AttrIter, NlAttr};
pub use builder::MessageBuilder;
pub use connection::Connection;
pub use error::{Error, Result};
pub use message::{MessageIter, NLMSG_HDRLEN, NlMsgHdr, NlMsgType};
pub use protocol::{ProtocolState, Route};
pub use socket::{NetlinkSocket, Protocol};

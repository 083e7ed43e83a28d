//! Data Center Bridging (`dcbnl`) over rtnetlink.
//!
//! Every DCB message body starts with a 4-byte [`DcbMsg`] followed by a
//! stream of `DCB_ATTR_*` attributes. The IEEE 802.1Qaz/Qbb objects live
//! in a nested `DCB_ATTR_IEEE` container.
//!
//! Constants mirror `include/uapi/linux/dcbnl.h` as of Linux v5.10. Newer
//! kernels add attributes; anything not listed here is classified as
//! `Unknown` and skipped by the decoder.
//!
//! # Example
//!
//! ```ignore
//! use dcbnl::netlink::{Connection, Route};
//!
//! let conn = Connection::<Route>::new()?;
//! for reply in conn.get_ieee_pfc("eth0").await? {
//!     if let Some(pfc) = &reply.ieee_pfc {
//!         for tc in pfc.enabled_tcs() {
//!             println!("tc{}: sent {} received {}", tc, pfc.requests[tc], pfc.indications[tc]);
//!         }
//!     }
//! }
//! ```

mod connection;
mod request;
mod response;
mod types;

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use super::error::{Error, Result};

pub use request::IeeeGetRequest;
pub use response::{DcbReply, ResponseDecoder, ShortPfcPolicy};
pub use types::{IEEE_PFC_LEN, IeeePfc, IeeePfcRaw};

/// Number of traffic classes in IEEE 802.1Qaz (`IEEE_8021QAZ_MAX_TCS`).
pub const IEEE_8021QAZ_MAX_TCS: usize = 8;

/// DCB commands (`enum dcbnl_commands`, subset).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DcbCmd {
    /// `DCB_CMD_IEEE_SET`
    IeeeSet = 20,
    /// `DCB_CMD_IEEE_GET`
    IeeeGet = 21,
}

impl DcbCmd {
    /// Parse from kernel value. Commands this crate does not speak map to `None`.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            20 => Some(DcbCmd::IeeeSet),
            21 => Some(DcbCmd::IeeeGet),
            _ => None,
        }
    }

    /// Convert to kernel value.
    pub fn number(self) -> u8 {
        self as u8
    }
}

/// Top-level DCB attributes (`enum dcbnl_attrs`, subset).
pub mod dcb_attr {
    /// Interface name (string)
    pub const IFNAME: u16 = 1;
    /// IEEE 802.1Qaz container (nested)
    pub const IEEE: u16 = 13;
}

/// Attributes nested in `DCB_ATTR_IEEE` (`enum ieee_attrs`, subset).
pub mod ieee_attr {
    /// Local PFC state (`struct ieee_pfc`)
    pub const PFC: u16 = 2;
    /// PFC state advertised by the link peer (`struct ieee_pfc`)
    pub const PEER_PFC: u16 = 5;
}

/// Classified top-level attribute type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DcbAttr {
    /// `DCB_ATTR_IFNAME`
    IfName,
    /// `DCB_ATTR_IEEE`
    Ieee,
    /// Any type this crate does not decode.
    Unknown(u16),
}

impl DcbAttr {
    /// Classify a raw attribute type.
    pub fn from_u16(v: u16) -> Self {
        match v {
            dcb_attr::IFNAME => DcbAttr::IfName,
            dcb_attr::IEEE => DcbAttr::Ieee,
            other => DcbAttr::Unknown(other),
        }
    }
}

/// Classified attribute type inside `DCB_ATTR_IEEE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IeeeAttr {
    /// `DCB_ATTR_IEEE_PFC`
    Pfc,
    /// `DCB_ATTR_IEEE_PEER_PFC`
    PeerPfc,
    /// Any type this crate does not decode.
    Unknown(u16),
}

impl IeeeAttr {
    /// Classify a raw attribute type.
    pub fn from_u16(v: u16) -> Self {
        match v {
            ieee_attr::PFC => IeeeAttr::Pfc,
            ieee_attr::PEER_PFC => IeeeAttr::PeerPfc,
            other => IeeeAttr::Unknown(other),
        }
    }
}

/// DCB message header (mirrors struct dcbmsg).
///
/// Native byte order, like every other rtnetlink family header.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct DcbMsg {
    /// Address family, always `AF_UNSPEC`.
    pub dcb_family: u8,
    /// Command (`DCB_CMD_*`).
    pub cmd: u8,
    /// Reserved.
    pub dcb_pad: u16,
}

impl DcbMsg {
    /// Size of the header on the wire.
    pub const SIZE: usize = std::mem::size_of::<Self>();

    /// Create a header for the given command with `AF_UNSPEC` family.
    pub fn new(cmd: DcbCmd) -> Self {
        Self {
            dcb_family: libc::AF_UNSPEC as u8,
            cmd: cmd.number(),
            dcb_pad: 0,
        }
    }

    /// Convert to bytes for netlink message building.
    pub fn as_bytes(&self) -> &[u8] {
        <Self as IntoBytes>::as_bytes(self)
    }

    /// Parse from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<&Self> {
        Self::ref_from_prefix(data)
            .map(|(r, _)| r)
            .map_err(|_| Error::Truncated {
                expected: Self::SIZE,
                actual: data.len(),
            })
    }

    /// The command, if it is one this crate knows.
    pub fn command(&self) -> Option<DcbCmd> {
        DcbCmd::from_u8(self.cmd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dcbmsg_size() {
        assert_eq!(DcbMsg::SIZE, 4);
        assert_eq!(DcbMsg::new(DcbCmd::IeeeGet).as_bytes().len(), 4);
    }

    #[test]
    fn dcbmsg_roundtrip() {
        let msg = DcbMsg::new(DcbCmd::IeeeGet);
        let bytes = msg.as_bytes().to_vec();
        assert_eq!(bytes, vec![0, 21, 0, 0]);

        let parsed = DcbMsg::from_bytes(&bytes).unwrap();
        assert_eq!(*parsed, msg);
        assert_eq!(parsed.dcb_family, libc::AF_UNSPEC as u8);
        assert_eq!(parsed.command(), Some(DcbCmd::IeeeGet));
    }

    #[test]
    fn dcbmsg_truncated() {
        assert!(matches!(
            DcbMsg::from_bytes(&[0, 21]),
            Err(Error::Truncated {
                expected: 4,
                actual: 2
            })
        ));
    }

    #[test]
    fn dcb_cmd_from_u8() {
        assert_eq!(DcbCmd::from_u8(21), Some(DcbCmd::IeeeGet));
        assert_eq!(DcbCmd::from_u8(20), Some(DcbCmd::IeeeSet));
        assert_eq!(DcbCmd::from_u8(1), None);
        assert_eq!(DcbCmd::IeeeGet.number(), 21);
    }

    #[test]
    fn attr_classification_tolerates_unknown() {
        assert_eq!(DcbAttr::from_u16(1), DcbAttr::IfName);
        assert_eq!(DcbAttr::from_u16(13), DcbAttr::Ieee);
        assert_eq!(DcbAttr::from_u16(14), DcbAttr::Unknown(14));
        assert_eq!(IeeeAttr::from_u16(2), IeeeAttr::Pfc);
        assert_eq!(IeeeAttr::from_u16(5), IeeeAttr::PeerPfc);
        assert_eq!(IeeeAttr::from_u16(1), IeeeAttr::Unknown(1));
    }
}

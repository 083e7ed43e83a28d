//! Decoding of `DCB_CMD_IEEE_GET` replies.

use tracing::{debug, info, trace, warn};

use super::types::IeeePfc;
use super::{DcbAttr, DcbMsg, IeeeAttr};
use crate::netlink::attr::{AttrIter, get};
use crate::netlink::error::{Error, Result};

/// Recognized fields of one DCB reply message.
///
/// Attribute order on the wire does not affect the value; if an attribute
/// is repeated the last one wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "output", derive(serde::Serialize))]
pub struct DcbReply {
    /// Interface name echoed by the kernel (`DCB_ATTR_IFNAME`).
    pub ifname: Option<String>,
    /// Local PFC state (`DCB_ATTR_IEEE_PFC`).
    pub ieee_pfc: Option<IeeePfc>,
}

impl DcbReply {
    /// Check whether no recognized attribute was present.
    pub fn is_empty(&self) -> bool {
        self.ifname.is_none() && self.ieee_pfc.is_none()
    }
}

/// What to do with a `DCB_ATTR_IEEE_PFC` shorter than `struct ieee_pfc`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ShortPfcPolicy {
    /// Fail the whole decode with [`Error::IeeePfcLength`].
    #[default]
    Fail,
    /// Log a warning, drop the attribute and keep decoding.
    Skip,
}

/// Decoder for DCB reply bodies.
#[derive(Debug, Clone, Copy)]
pub struct ResponseDecoder {
    header_len: usize,
    short_pfc: ShortPfcPolicy,
}

impl Default for ResponseDecoder {
    fn default() -> Self {
        Self {
            header_len: DcbMsg::SIZE,
            short_pfc: ShortPfcPolicy::default(),
        }
    }
}

impl ResponseDecoder {
    /// Create a decoder expecting a `struct dcbmsg` prefix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the length of the protocol header that precedes the attributes.
    pub fn header_len(mut self, len: usize) -> Self {
        self.header_len = len;
        self
    }

    /// Set the policy for under-length PFC attributes.
    pub fn short_pfc(mut self, policy: ShortPfcPolicy) -> Self {
        self.short_pfc = policy;
        self
    }

    /// Decode one reply body (the bytes after the `nlmsghdr`).
    ///
    /// A body that carries nothing past the protocol header is not an error;
    /// it yields `Ok(None)`. Broken attribute framing at either nesting level
    /// is an error.
    pub fn decode(&self, data: &[u8]) -> Result<Option<DcbReply>> {
        if data.len() <= self.header_len {
            info!(len = data.len(), "invalid dcbmsg length");
            return Ok(None);
        }

        let mut reply = DcbReply::default();
        for attr in AttrIter::new(&data[self.header_len..]) {
            let (kind, payload) = attr?;
            match DcbAttr::from_u16(kind) {
                DcbAttr::IfName => {
                    reply.ifname = Some(get::string_lossy(payload).into_owned());
                }
                DcbAttr::Ieee => self.decode_ieee(payload, &mut reply)?,
                DcbAttr::Unknown(kind) => trace!(kind, "skipping dcb attribute"),
            }
        }

        Ok(Some(reply))
    }

    /// Decode every reply body, dropping header-only ones.
    pub fn decode_all<B: AsRef<[u8]>>(&self, messages: &[B]) -> Result<Vec<DcbReply>> {
        let mut replies = Vec::with_capacity(messages.len());
        for msg in messages {
            if let Some(reply) = self.decode(msg.as_ref())? {
                replies.push(reply);
            }
        }
        Ok(replies)
    }

    fn decode_ieee(&self, data: &[u8], reply: &mut DcbReply) -> Result<()> {
        for attr in AttrIter::new(data) {
            let (kind, payload) = attr?;
            match IeeeAttr::from_u16(kind) {
                IeeeAttr::Pfc => match IeeePfc::parse(payload) {
                    Ok(pfc) => reply.ieee_pfc = Some(pfc),
                    Err(e @ Error::IeeePfcLength { .. })
                        if self.short_pfc == ShortPfcPolicy::Skip =>
                    {
                        warn!(ifname = ?reply.ifname, "skipping ieee pfc: {}", e);
                    }
                    Err(e) => return Err(e),
                },
                // TODO: decode into a `peer_pfc` field of DcbReply
                IeeeAttr::PeerPfc => debug!(len = payload.len(), "ignoring ieee peer pfc"),
                IeeeAttr::Unknown(kind) => trace!(kind, "skipping ieee attribute"),
            }
        }
        Ok(())
    }
}

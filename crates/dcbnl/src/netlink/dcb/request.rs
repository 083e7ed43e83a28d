//! `DCB_CMD_IEEE_GET` request construction.

use super::{DcbCmd, DcbMsg, dcb_attr};
use crate::netlink::builder::MessageBuilder;
use crate::netlink::error::Result;
use crate::netlink::message::{NLM_F_ACK, NLM_F_REQUEST, NlMsgType};

/// Request for the IEEE 802.1Qaz/Qbb state of one interface.
///
/// The name is passed through as-is; the kernel rejects names it does not
/// know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IeeeGetRequest {
    ifname: String,
}

impl IeeeGetRequest {
    /// Create a request for `ifname`.
    pub fn new(ifname: impl Into<String>) -> Self {
        Self {
            ifname: ifname.into(),
        }
    }

    /// The interface this request is for.
    pub fn ifname(&self) -> &str {
        &self.ifname
    }

    /// The protocol header sent in front of the attributes.
    pub fn header(&self) -> DcbMsg {
        DcbMsg::new(DcbCmd::IeeeGet)
    }

    /// Build the complete `RTM_GETDCB` message.
    ///
    /// Fails if the interface name cannot be encoded as an attribute.
    pub fn build(&self) -> Result<MessageBuilder> {
        let mut builder = MessageBuilder::new(NlMsgType::RTM_GETDCB, NLM_F_REQUEST | NLM_F_ACK);
        builder.append_bytes(self.header().as_bytes());
        builder.append_attr_str(dcb_attr::IFNAME, &self.ifname)?;
        Ok(builder)
    }

    /// Message body only: `struct dcbmsg` followed by `DCB_ATTR_IFNAME`.
    pub fn body(&self) -> Result<Vec<u8>> {
        Ok(self.build()?.payload().to_vec())
    }
}

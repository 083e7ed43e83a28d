//! Netlink message header and parsing.

use super::error::{Error, Result};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// Netlink message header alignment.
pub const NLMSG_ALIGNTO: usize = 4;

/// Align a length to NLMSG_ALIGNTO boundary.
#[inline]
pub const fn nlmsg_align(len: usize) -> usize {
    (len + NLMSG_ALIGNTO - 1) & !(NLMSG_ALIGNTO - 1)
}

/// Size of the netlink message header.
pub const NLMSG_HDRLEN: usize = nlmsg_align(std::mem::size_of::<NlMsgHdr>());

/// Netlink message header (mirrors struct nlmsghdr).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct NlMsgHdr {
    /// Length of message including header.
    pub nlmsg_len: u32,
    /// Message type.
    pub nlmsg_type: u16,
    /// Additional flags.
    pub nlmsg_flags: u16,
    /// Sequence number.
    pub nlmsg_seq: u32,
    /// Sending process port ID.
    pub nlmsg_pid: u32,
}

impl NlMsgHdr {
    /// Create a new message header.
    pub fn new(msg_type: u16, flags: u16) -> Self {
        Self {
            nlmsg_len: NLMSG_HDRLEN as u32,
            nlmsg_type: msg_type,
            nlmsg_flags: flags,
            nlmsg_seq: 0,
            nlmsg_pid: 0,
        }
    }

    /// Check if this is an error message.
    pub fn is_error(&self) -> bool {
        self.nlmsg_type == NlMsgType::ERROR
    }

    /// Check if this is a done message.
    pub fn is_done(&self) -> bool {
        self.nlmsg_type == NlMsgType::DONE
    }

    /// Check if this is a no-op message.
    pub fn is_noop(&self) -> bool {
        self.nlmsg_type == NlMsgType::NOOP
    }

    /// Check if this message has the multi flag.
    pub fn is_multi(&self) -> bool {
        self.nlmsg_flags & NLM_F_MULTI != 0
    }

    /// Convert header to bytes.
    pub fn as_bytes(&self) -> &[u8] {
        <Self as IntoBytes>::as_bytes(self)
    }

    /// Parse header from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<&Self> {
        Self::ref_from_prefix(data)
            .map(|(r, _)| r)
            .map_err(|_| Error::Truncated {
                expected: std::mem::size_of::<Self>(),
                actual: data.len(),
            })
    }
}

/// Standard netlink message types.
pub struct NlMsgType;

impl NlMsgType {
    /// No operation, message must be discarded.
    pub const NOOP: u16 = 1;
    /// Error message or ACK.
    pub const ERROR: u16 = 2;
    /// End of multipart message.
    pub const DONE: u16 = 3;
    /// Data lost, request resend.
    pub const OVERRUN: u16 = 4;

    // Data Center Bridging messages
    pub const RTM_GETDCB: u16 = 78;
    pub const RTM_SETDCB: u16 = 79;
}

/// Netlink message flags.
pub const NLM_F_REQUEST: u16 = 0x01;
pub const NLM_F_MULTI: u16 = 0x02;
pub const NLM_F_ACK: u16 = 0x04;
pub const NLM_F_ECHO: u16 = 0x08;

/// Iterator over netlink messages in a buffer.
pub struct MessageIter<'a> {
    data: &'a [u8],
}

impl<'a> MessageIter<'a> {
    /// Create a new message iterator.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }
}

impl<'a> Iterator for MessageIter<'a> {
    type Item = Result<(&'a NlMsgHdr, &'a [u8])>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.data.len() < NLMSG_HDRLEN {
            return None;
        }

        let header = match NlMsgHdr::from_bytes(self.data) {
            Ok(h) => h,
            Err(e) => return Some(Err(e)),
        };

        let msg_len = header.nlmsg_len as usize;
        if msg_len < NLMSG_HDRLEN || msg_len > self.data.len() {
            self.data = &[];
            return Some(Err(Error::InvalidMessage(format!(
                "invalid message length: {}",
                msg_len
            ))));
        }

        let payload = &self.data[NLMSG_HDRLEN..msg_len];
        let aligned_len = nlmsg_align(msg_len);

        // Move to next message
        if aligned_len >= self.data.len() {
            self.data = &[];
        } else {
            self.data = &self.data[aligned_len..];
        }

        Some(Ok((header, payload)))
    }
}

/// Netlink error message payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout)]
pub struct NlMsgError {
    /// Error code (negative errno or 0 for ACK).
    pub error: i32,
    /// Original message header that caused the error.
    pub msg: NlMsgHdr,
}

impl NlMsgError {
    /// Parse error message from payload.
    ///
    /// Only the errno is required; with `NETLINK_CAP_ACK` the kernel may
    /// truncate the echoed request header.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if let Ok((err, _)) = Self::read_from_prefix(data) {
            return Ok(err);
        }
        let (error, _) = i32::read_from_prefix(data).map_err(|_| Error::Truncated {
            expected: std::mem::size_of::<i32>(),
            actual: data.len(),
        })?;
        Ok(Self {
            error,
            msg: NlMsgHdr::default(),
        })
    }

    /// Check if this is an ACK (no error).
    pub fn is_ack(&self) -> bool {
        self.error == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(msg_type: u16, seq: u32, payload: &[u8]) -> Vec<u8> {
        let mut hdr = NlMsgHdr::new(msg_type, 0);
        hdr.nlmsg_len = (NLMSG_HDRLEN + payload.len()) as u32;
        hdr.nlmsg_seq = seq;
        let mut buf = hdr.as_bytes().to_vec();
        buf.extend_from_slice(payload);
        buf.resize(nlmsg_align(buf.len()), 0);
        buf
    }

    #[test]
    fn test_header_size() {
        assert_eq!(NLMSG_HDRLEN, 16);
    }

    #[test]
    fn test_iterates_messages() {
        let mut buf = message(NlMsgType::RTM_GETDCB, 7, &[21, 0, 0, 0, 1]);
        buf.extend(message(NlMsgType::ERROR, 7, &0i32.to_ne_bytes()));

        let msgs: Vec<_> = MessageIter::new(&buf).collect::<Result<_>>().unwrap();
        assert_eq!(msgs.len(), 2);
        assert_eq!(msgs[0].0.nlmsg_type, NlMsgType::RTM_GETDCB);
        assert_eq!(msgs[0].1, &[21, 0, 0, 0, 1]);
        assert!(msgs[1].0.is_error());
        assert!(NlMsgError::from_bytes(msgs[1].1).unwrap().is_ack());
    }

    #[test]
    fn test_invalid_length() {
        let mut buf = message(NlMsgType::RTM_GETDCB, 1, &[0; 4]);
        buf[0..4].copy_from_slice(&200u32.to_ne_bytes());
        let mut iter = MessageIter::new(&buf);
        assert!(matches!(iter.next(), Some(Err(Error::InvalidMessage(_)))));
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_error_payload() {
        let err = NlMsgError::from_bytes(&(-19i32).to_ne_bytes()).unwrap();
        assert!(!err.is_ack());
        assert_eq!(err.error, -19);
        assert!(NlMsgError::from_bytes(&[0, 0]).is_err());
    }
}

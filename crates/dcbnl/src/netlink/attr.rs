//! Netlink attribute (rtattr/nlattr) handling.

use super::error::{Error, Result};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// Netlink attribute alignment.
pub const NLA_ALIGNTO: usize = 4;

/// Align a length to NLA_ALIGNTO boundary.
#[inline]
pub const fn nla_align(len: usize) -> usize {
    (len + NLA_ALIGNTO - 1) & !(NLA_ALIGNTO - 1)
}

/// Size of the attribute header.
pub const NLA_HDRLEN: usize = 4; // nla_align(size_of::<NlAttr>())

/// Largest payload that fits in the 16-bit `nla_len`.
pub const NLA_MAX_PAYLOAD: usize = u16::MAX as usize - NLA_HDRLEN;

/// Netlink attribute header (mirrors struct nlattr / struct rtattr).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct NlAttr {
    /// Length including header.
    pub nla_len: u16,
    /// Attribute type.
    pub nla_type: u16,
}

/// Attribute type flags.
pub const NLA_F_NESTED: u16 = 1 << 15;
pub const NLA_F_NET_BYTEORDER: u16 = 1 << 14;
pub const NLA_TYPE_MASK: u16 = !(NLA_F_NESTED | NLA_F_NET_BYTEORDER);

impl NlAttr {
    /// Create a new attribute header.
    ///
    /// Fails if the payload does not fit in `nla_len`.
    pub fn new(attr_type: u16, data_len: usize) -> Result<Self> {
        if data_len > NLA_MAX_PAYLOAD {
            return Err(Error::InvalidAttribute(format!(
                "attribute {} payload too large: {} bytes",
                attr_type, data_len
            )));
        }
        Ok(Self {
            nla_len: (NLA_HDRLEN + data_len) as u16,
            nla_type: attr_type,
        })
    }

    /// Get the attribute type without flags.
    pub fn kind(&self) -> u16 {
        self.nla_type & NLA_TYPE_MASK
    }

    /// Check if this is a nested attribute.
    pub fn is_nested(&self) -> bool {
        self.nla_type & NLA_F_NESTED != 0
    }

    /// Get the payload length (total length minus header).
    pub fn payload_len(&self) -> usize {
        (self.nla_len as usize).saturating_sub(NLA_HDRLEN)
    }

    /// Convert to bytes.
    pub fn as_bytes(&self) -> &[u8] {
        <Self as IntoBytes>::as_bytes(self)
    }

    /// Parse from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<&Self> {
        Self::ref_from_prefix(data)
            .map(|(r, _)| r)
            .map_err(|_| Error::Truncated {
                expected: std::mem::size_of::<Self>(),
                actual: data.len(),
            })
    }
}

/// Iterator over netlink attributes in a buffer.
///
/// The same iterator walks a top-level attribute stream and the payload of
/// a nested attribute. Broken framing yields one `Err` and ends the walk;
/// the caller decides whether that is fatal.
pub struct AttrIter<'a> {
    data: &'a [u8],
}

impl<'a> AttrIter<'a> {
    /// Create a new attribute iterator.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Check if there are no more attributes.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn fail(&mut self, msg: String) -> Option<Result<(u16, &'a [u8])>> {
        self.data = &[];
        Some(Err(Error::InvalidAttribute(msg)))
    }
}

impl<'a> Iterator for AttrIter<'a> {
    /// Returns (attribute type, payload data).
    type Item = Result<(u16, &'a [u8])>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.data.is_empty() {
            return None;
        }

        let attr = match NlAttr::from_bytes(self.data) {
            Ok(a) => *a,
            Err(_) => {
                let msg = format!("truncated attribute header: {} bytes left", self.data.len());
                return self.fail(msg);
            }
        };

        let len = attr.nla_len as usize;
        if len < NLA_HDRLEN {
            let msg = format!("attribute {} length {} below header size", attr.kind(), len);
            return self.fail(msg);
        }
        if len > self.data.len() {
            let msg = format!(
                "attribute {} length {} exceeds remaining {} bytes",
                attr.kind(),
                len,
                self.data.len()
            );
            return self.fail(msg);
        }

        let payload = &self.data[NLA_HDRLEN..len];
        let aligned_len = nla_align(len);

        // Move to next attribute
        if aligned_len >= self.data.len() {
            self.data = &[];
        } else {
            self.data = &self.data[aligned_len..];
        }

        Some(Ok((attr.kind(), payload)))
    }
}

/// Helper functions for extracting typed values from attribute payloads.
pub mod get {
    use super::*;

    /// Extract a u8 value.
    pub fn u8(data: &[u8]) -> Result<u8> {
        data.first()
            .copied()
            .ok_or_else(|| Error::InvalidAttribute("empty u8 attribute".into()))
    }

    /// Extract a u16 value (big endian / network order).
    pub fn u16_be(data: &[u8]) -> Result<u16> {
        match data.get(..2) {
            Some(b) => Ok(u16::from_be_bytes([b[0], b[1]])),
            None => Err(Error::InvalidAttribute("truncated u16 attribute".into())),
        }
    }

    /// Extract a u64 value (big endian / network order).
    pub fn u64_be(data: &[u8]) -> Result<u64> {
        data.get(..8)
            .and_then(|b| <[u8; 8]>::try_from(b).ok())
            .map(u64::from_be_bytes)
            .ok_or_else(|| Error::InvalidAttribute("truncated u64 attribute".into()))
    }

    /// Extract a null-terminated string.
    pub fn string(data: &[u8]) -> Result<&str> {
        // Find null terminator or use whole buffer
        let len = data.iter().position(|&b| b == 0).unwrap_or(data.len());
        std::str::from_utf8(&data[..len])
            .map_err(|e| Error::InvalidAttribute(format!("invalid UTF-8: {}", e)))
    }

    /// Extract a null-terminated string, replacing invalid UTF-8.
    ///
    /// Kernel names (interfaces, drivers) are byte strings.
    pub fn string_lossy(data: &[u8]) -> std::borrow::Cow<'_, str> {
        let len = data.iter().position(|&b| b == 0).unwrap_or(data.len());
        String::from_utf8_lossy(&data[..len])
    }

    /// Extract bytes (no interpretation).
    pub fn bytes(data: &[u8]) -> &[u8] {
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attr(kind: u16, payload: &[u8]) -> Vec<u8> {
        let mut buf = NlAttr::new(kind, payload.len()).unwrap().as_bytes().to_vec();
        buf.extend_from_slice(payload);
        buf.resize(nla_align(buf.len()), 0);
        buf
    }

    #[test]
    fn test_align() {
        assert_eq!(nla_align(0), 0);
        assert_eq!(nla_align(1), 4);
        assert_eq!(nla_align(4), 4);
        assert_eq!(nla_align(5), 8);
    }

    #[test]
    fn test_iterates_padded_attributes() {
        let mut buf = attr(1, b"eth0\0");
        buf.extend(attr(13, &[1, 2, 3, 4]));

        let attrs: Vec<_> = AttrIter::new(&buf).collect::<Result<_>>().unwrap();
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs[0], (1, &b"eth0\0"[..]));
        assert_eq!(attrs[1], (13, &[1u8, 2, 3, 4][..]));
    }

    #[test]
    fn test_unpadded_last_attribute() {
        let mut buf = attr(1, b"lo\0\0");
        // 5-byte payload without trailing alignment
        buf.extend_from_slice(&9u16.to_ne_bytes());
        buf.extend_from_slice(&2u16.to_ne_bytes());
        buf.extend_from_slice(&[1, 2, 3, 4, 5]);

        let attrs: Vec<_> = AttrIter::new(&buf).collect::<Result<_>>().unwrap();
        assert_eq!(attrs[1], (2, &[1u8, 2, 3, 4, 5][..]));
    }

    #[test]
    fn test_strips_type_flags() {
        let buf = attr(13 | NLA_F_NESTED, &[]);
        let (kind, payload) = AttrIter::new(&buf).next().unwrap().unwrap();
        assert_eq!(kind, 13);
        assert!(payload.is_empty());
    }

    #[test]
    fn test_empty_stream() {
        assert!(AttrIter::new(&[]).next().is_none());
        assert!(AttrIter::new(&[]).is_empty());
    }

    #[test]
    fn test_truncated_header_is_error() {
        let mut iter = AttrIter::new(&[8, 0]);
        assert!(matches!(
            iter.next(),
            Some(Err(Error::InvalidAttribute(_)))
        ));
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_length_overrun_is_error() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&64u16.to_ne_bytes());
        buf.extend_from_slice(&1u16.to_ne_bytes());
        buf.extend_from_slice(b"eth0");
        let err = AttrIter::new(&buf).next().unwrap().unwrap_err();
        assert!(err.to_string().contains("exceeds remaining"));
    }

    #[test]
    fn test_length_below_header_is_error() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&2u16.to_ne_bytes());
        buf.extend_from_slice(&1u16.to_ne_bytes());
        assert!(AttrIter::new(&buf).next().unwrap().is_err());
    }

    #[test]
    fn test_error_after_valid_attribute() {
        let mut buf = attr(1, b"eth0\0");
        buf.extend_from_slice(&[0xff]);
        let mut iter = AttrIter::new(&buf);
        assert!(iter.next().unwrap().is_ok());
        assert!(iter.next().unwrap().is_err());
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_oversized_attribute_rejected() {
        assert!(NlAttr::new(1, NLA_MAX_PAYLOAD).is_ok());
        assert!(NlAttr::new(1, NLA_MAX_PAYLOAD + 1).is_err());
    }

    #[test]
    fn test_get_helpers() {
        assert_eq!(get::string(b"eth0\0\0\0").unwrap(), "eth0");
        assert_eq!(get::string(b"eth0").unwrap(), "eth0");
        assert!(get::string(&[0xff, 0xfe, 0]).is_err());
        assert_eq!(get::string_lossy(b"lo\0"), "lo");
        assert_eq!(get::string_lossy(&[b'a', 0xff]), "a\u{fffd}");
        assert_eq!(get::u8(&[7]).unwrap(), 7);
        assert!(get::u8(&[]).is_err());
        assert_eq!(get::u16_be(&[0x00, 0x64]).unwrap(), 100);
        assert_eq!(get::u64_be(&[0, 0, 0, 0, 0, 0, 1, 0]).unwrap(), 256);
        assert!(get::u64_be(&[0; 7]).is_err());
        assert_eq!(get::bytes(&[1, 2]), &[1, 2]);
    }
}

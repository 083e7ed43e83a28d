//! IEEE 802.1Qbb PFC object carried in `DCB_ATTR_IEEE_PFC`.

use zerocopy::byteorder::{BigEndian, U16, U64};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use super::IEEE_8021QAZ_MAX_TCS;
use crate::netlink::error::{Error, Result};

/// Minimum payload length accepted for a `struct ieee_pfc` attribute.
pub const IEEE_PFC_LEN: usize = 139;

/// Wire image of `struct ieee_pfc`.
///
/// Unlike the rtnetlink headers, the multi-byte fields are big-endian.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct IeeePfcRaw {
    pub pfc_cap: u8,
    pub pfc_en: u8,
    pub mbc: u8,
    pub delay: U16<BigEndian>,
    pub _pad: [u8; 3],
    pub requests: [U64<BigEndian>; IEEE_8021QAZ_MAX_TCS],
    pub indications: [U64<BigEndian>; IEEE_8021QAZ_MAX_TCS],
}

impl IeeePfcRaw {
    /// Convert to bytes.
    pub fn as_bytes(&self) -> &[u8] {
        <Self as IntoBytes>::as_bytes(self)
    }
}

/// Priority Flow Control state and pause frame counters of one interface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "output", derive(serde::Serialize))]
pub struct IeeePfc {
    /// Number of traffic classes that can do PFC.
    pub pfc_cap: u8,
    /// Bitmask of traffic classes with PFC enabled.
    pub pfc_en: u8,
    /// MACsec bypass capability.
    pub mbc: u8,
    /// PFC delay allowance.
    pub delay: u16,
    /// PFC frames sent, per traffic class.
    pub requests: [u64; IEEE_8021QAZ_MAX_TCS],
    /// PFC frames received, per traffic class.
    pub indications: [u64; IEEE_8021QAZ_MAX_TCS],
}

impl IeeePfc {
    /// Decode an attribute payload.
    ///
    /// Bytes past the structure are ignored.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < IEEE_PFC_LEN {
            return Err(Error::IeeePfcLength {
                actual: data.len(),
                required: IEEE_PFC_LEN,
            });
        }
        let (raw, _) = IeeePfcRaw::ref_from_prefix(data).map_err(|_| Error::Truncated {
            expected: std::mem::size_of::<IeeePfcRaw>(),
            actual: data.len(),
        })?;
        Ok(Self::from(raw))
    }

    /// Whether PFC is enabled on traffic class `tc`.
    pub fn enabled(&self, tc: usize) -> bool {
        tc < IEEE_8021QAZ_MAX_TCS && self.pfc_en & (1 << tc) != 0
    }

    /// Traffic classes with PFC enabled, lowest first.
    pub fn enabled_tcs(&self) -> impl Iterator<Item = usize> {
        let pfc_en = self.pfc_en;
        (0..IEEE_8021QAZ_MAX_TCS).filter(move |tc| pfc_en & (1 << tc) != 0)
    }
}

impl From<&IeeePfcRaw> for IeeePfc {
    fn from(raw: &IeeePfcRaw) -> Self {
        Self {
            pfc_cap: raw.pfc_cap,
            pfc_en: raw.pfc_en,
            mbc: raw.mbc,
            delay: raw.delay.get(),
            requests: raw.requests.map(|v| v.get()),
            indications: raw.indications.map(|v| v.get()),
        }
    }
}

impl From<&IeeePfc> for IeeePfcRaw {
    fn from(pfc: &IeeePfc) -> Self {
        Self {
            pfc_cap: pfc.pfc_cap,
            pfc_en: pfc.pfc_en,
            mbc: pfc.mbc,
            delay: U16::new(pfc.delay),
            _pad: [0; 3],
            requests: pfc.requests.map(U64::new),
            indications: pfc.indications.map(U64::new),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> IeeePfc {
        IeeePfc {
            pfc_cap: 8,
            pfc_en: 0xff,
            mbc: 0,
            delay: 100,
            requests: [1, 2, 3, 4, 5, 6, 7, 8],
            indications: [10, 20, 30, 40, 50, 60, 70, 80],
        }
    }

    /// Hand-assembled buffer, independent of `IeeePfcRaw`.
    fn sample_bytes() -> Vec<u8> {
        let mut buf = vec![8, 0xff, 0];
        buf.extend_from_slice(&100u16.to_be_bytes());
        buf.extend_from_slice(&[0; 3]);
        for v in 1..=8u64 {
            buf.extend_from_slice(&v.to_be_bytes());
        }
        for v in 1..=8u64 {
            buf.extend_from_slice(&(v * 10).to_be_bytes());
        }
        buf.resize(IEEE_PFC_LEN, 0);
        buf
    }

    #[test]
    fn raw_layout() {
        assert_eq!(std::mem::size_of::<IeeePfcRaw>(), 136);
        assert_eq!(std::mem::align_of::<IeeePfcRaw>(), 1);
    }

    #[test]
    fn parse_known_values() {
        let pfc = IeeePfc::parse(&sample_bytes()).unwrap();
        assert_eq!(pfc, sample());
    }

    #[test]
    fn fields_are_big_endian() {
        let mut buf = sample_bytes();
        buf[3..5].copy_from_slice(&[0x01, 0x02]);
        buf[8..16].copy_from_slice(&[0, 0, 0, 0, 0, 0, 0x01, 0x00]);
        let pfc = IeeePfc::parse(&buf).unwrap();
        assert_eq!(pfc.delay, 0x0102);
        assert_eq!(pfc.requests[0], 256);
    }

    #[test]
    fn padding_is_not_interpreted() {
        let mut buf = sample_bytes();
        buf[5..8].copy_from_slice(&[0xde, 0xad, 0xbe]);
        assert_eq!(IeeePfc::parse(&buf).unwrap(), sample());
    }

    #[test]
    fn short_buffer_names_length() {
        for len in [0, 1, 8, 136, IEEE_PFC_LEN - 1] {
            let err = IeeePfc::parse(&vec![0; len]).unwrap_err();
            match err {
                Error::IeeePfcLength { actual, required } => {
                    assert_eq!(actual, len);
                    assert_eq!(required, IEEE_PFC_LEN);
                }
                other => panic!("unexpected error: {other}"),
            }
        }
    }

    #[test]
    fn trailing_bytes_ignored() {
        let mut buf = sample_bytes();
        buf.extend_from_slice(&[0xff; 32]);
        assert_eq!(IeeePfc::parse(&buf).unwrap(), sample());
    }

    #[test]
    fn raw_conversion_matches_wire() {
        let raw = IeeePfcRaw::from(&sample());
        assert_eq!(raw.as_bytes(), &sample_bytes()[..136]);
        assert_eq!(IeeePfc::from(&raw), sample());
    }

    #[test]
    fn enabled_traffic_classes() {
        let pfc = IeeePfc {
            pfc_en: 0b1000_1001,
            ..Default::default()
        };
        assert!(pfc.enabled(0));
        assert!(!pfc.enabled(1));
        assert!(pfc.enabled(7));
        assert!(!pfc.enabled(8));
        assert_eq!(pfc.enabled_tcs().collect::<Vec<_>>(), vec![0, 3, 7]);
    }
}

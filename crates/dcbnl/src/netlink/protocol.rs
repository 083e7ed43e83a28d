//! Protocol state types for strongly-typed connections.
//!
//! The protocol a [`Connection`](super::Connection) speaks is part of its
//! type, so DCB queries only exist on `Connection<Route>`.
//!
//! The [`ProtocolState`] trait is sealed to prevent external implementations.

use super::socket::Protocol;

/// Sealed trait module to prevent external implementations.
mod private {
    pub trait Sealed {}
}

/// Protocol state trait for typed connections.
///
/// This trait is sealed and cannot be implemented outside this crate.
pub trait ProtocolState: private::Sealed + Default {
    /// The netlink protocol for this state type.
    const PROTOCOL: Protocol;
}

/// Route protocol state (RTNetlink).
///
/// `dcbnl` is carried over rtnetlink as `RTM_GETDCB` / `RTM_SETDCB`.
/// This is a zero-sized type with no additional state.
#[derive(Debug, Default, Clone, Copy)]
pub struct Route;

impl private::Sealed for Route {}

impl ProtocolState for Route {
    const PROTOCOL: Protocol = Protocol::Route;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_is_zero_sized() {
        assert_eq!(std::mem::size_of::<Route>(), 0);
    }

    #[test]
    fn protocol_constants() {
        assert_eq!(Route::PROTOCOL, Protocol::Route);
    }
}

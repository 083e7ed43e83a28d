//! High-level netlink connection with request/response handling.

use super::builder::MessageBuilder;
use super::error::{Error, Result};
use super::message::{MessageIter, NlMsgError};
use super::protocol::{ProtocolState, Route};
use super::socket::NetlinkSocket;

/// High-level netlink connection.
///
/// The type parameter fixes the netlink protocol the socket was opened for.
pub struct Connection<P: ProtocolState = Route> {
    socket: NetlinkSocket,
    state: P,
}

impl<P: ProtocolState> Connection<P> {
    /// Open and bind a socket for this connection's protocol.
    pub fn new() -> Result<Self> {
        let socket = NetlinkSocket::new(P::PROTOCOL)?;
        Ok(Self::from_parts(socket, P::default()))
    }

    /// Assemble a connection from an already bound socket.
    pub(crate) fn from_parts(socket: NetlinkSocket, state: P) -> Self {
        Self { socket, state }
    }

    /// Get the underlying socket.
    pub fn socket(&self) -> &NetlinkSocket {
        &self.socket
    }

    /// Get the protocol state.
    pub fn state(&self) -> &P {
        &self.state
    }

    /// Send a request and collect every reply up to the kernel's ACK.
    ///
    /// Returns the body (bytes after the `nlmsghdr`) of each data message in
    /// arrival order. A kernel error aborts the exchange. The request should
    /// carry `NLM_F_ACK`, otherwise this waits for a `NLMSG_DONE` that a
    /// plain request never gets.
    pub async fn execute(&self, mut builder: MessageBuilder) -> Result<Vec<Vec<u8>>> {
        let seq = self.socket.next_seq();
        builder.set_seq(seq);
        builder.set_pid(self.socket.pid());

        let msg = builder.finish();
        self.socket.send(&msg).await?;

        let mut responses = Vec::new();
        loop {
            let data = self.socket.recv_msg().await?;
            if collect_replies(&data, seq, &mut responses)? {
                break;
            }
        }

        tracing::trace!(seq, count = responses.len(), "request complete");
        Ok(responses)
    }
}

/// Sort one received datagram into data messages and terminators.
///
/// Returns `true` once the exchange for `seq` is finished.
fn collect_replies(data: &[u8], seq: u32, responses: &mut Vec<Vec<u8>>) -> Result<bool> {
    for result in MessageIter::new(data) {
        let (header, payload) = result?;

        // Check sequence number
        if header.nlmsg_seq != seq {
            tracing::trace!(
                expected = seq,
                actual = header.nlmsg_seq,
                "ignoring foreign message"
            );
            continue;
        }

        if header.is_error() {
            let err = NlMsgError::from_bytes(payload)?;
            if !err.is_ack() {
                return Err(Error::from_errno(err.error));
            }
            return Ok(true);
        }

        if header.is_done() {
            return Ok(true);
        }

        if header.is_noop() {
            continue;
        }

        responses.push(payload.to_vec());
    }

    Ok(false)
}

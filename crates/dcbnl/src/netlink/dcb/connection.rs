//! DCB queries on `Connection<Route>`.

use super::request::IeeeGetRequest;
use super::response::{DcbReply, ResponseDecoder};
use crate::netlink::connection::Connection;
use crate::netlink::error::Result;
use crate::netlink::protocol::Route;

impl Connection<Route> {
    /// Query the IEEE PFC state of an interface.
    ///
    /// Kernel errors come back with the interface in their context. An
    /// interface without DCB support (bond, loopback, most virtual
    /// devices) fails with [`Error::is_not_supported`](crate::Error::is_not_supported).
    ///
    /// # Example
    ///
    /// ```ignore
    /// use dcbnl::netlink::{Connection, Route};
    ///
    /// let conn = Connection::<Route>::new()?;
    /// for reply in conn.get_ieee_pfc("eth0").await? {
    ///     println!("{:?}", reply.ieee_pfc);
    /// }
    /// ```
    pub async fn get_ieee_pfc(&self, ifname: &str) -> Result<Vec<DcbReply>> {
        self.get_ieee_pfc_with(ifname, &ResponseDecoder::new()).await
    }

    /// Query the IEEE PFC state of an interface with a custom decoder.
    pub async fn get_ieee_pfc_with(
        &self,
        ifname: &str,
        decoder: &ResponseDecoder,
    ) -> Result<Vec<DcbReply>> {
        let request = IeeeGetRequest::new(ifname);
        let builder = request.build()?;

        tracing::debug!(ifname, "requesting ieee dcb state");
        let responses = self
            .execute(builder)
            .await
            .map_err(|e| e.with_context(format!("ifname: {}, get ieee pfc", ifname)))?;

        decoder.decode_all(&responses)
    }
}

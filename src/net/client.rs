//! Sending DNS queries.
//!
//! This module provides a small query client for the two classic
//! transports: single-shot UDP datagrams and length-framed TCP. Responses
//! are checked against the request before they are returned: a response
//! whose transaction ID doesn't match the request fails with
//! [`DnsError::IdMismatch`].
//!
//! [`query_auto`] implements the usual client behavior of starting over
//! UDP and retrying over TCP when the response comes back truncated.

use crate::base::message::Message;
use crate::base::DnsError;
use core::fmt;
use core::time::Duration;
use std::io;
use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpStream, UdpSocket};
use tokio::time::timeout;

/// The size of the receive buffer for UDP responses.
const RECV_SIZE: usize = 65535;

//------------ query ---------------------------------------------------------

/// Sends a query over UDP and returns the response.
///
/// The response may have the TC flag set, meaning the server had more data
/// than fit the datagram; use [`query_auto`] to handle that transparently.
pub async fn query(
    request: &Message,
    server: SocketAddr,
    wait: Duration,
) -> Result<Message, Error> {
    let packet = request.pack()?;
    let sock = UdpSocket::bind(local_addr_for(server)).await?;
    sock.connect(server).await?;
    sock.send(&packet).await?;
    let mut buf = vec![0u8; RECV_SIZE];
    let len = timeout(wait, sock.recv(&mut buf))
        .await
        .map_err(|_| Error::Timeout)??;
    check_response(request, &buf[..len])
}

/// Sends a query over TCP and returns the response.
pub async fn query_tcp(
    request: &Message,
    server: SocketAddr,
    wait: Duration,
) -> Result<Message, Error> {
    let packet = request.pack()?;
    let mut stream = timeout(wait, TcpStream::connect(server))
        .await
        .map_err(|_| Error::Timeout)??;
    stream.write_u16(packet.len() as u16).await?;
    stream.write_all(&packet).await?;
    let len = timeout(wait, stream.read_u16())
        .await
        .map_err(|_| Error::Timeout)??;
    let mut buf = vec![0u8; usize::from(len)];
    timeout(wait, stream.read_exact(&mut buf))
        .await
        .map_err(|_| Error::Timeout)??;
    check_response(request, &buf)
}

/// Sends a query over UDP, falling back to TCP on truncation.
pub async fn query_auto(
    request: &Message,
    server: SocketAddr,
    wait: Duration,
) -> Result<Message, Error> {
    let response = query(request, server, wait).await?;
    if response.header().tc() {
        query_tcp(request, server, wait).await
    } else {
        Ok(response)
    }
}

//------------ Helper Functions ----------------------------------------------

/// Parses a response packet and validates it against the request.
fn check_response(
    request: &Message,
    packet: &[u8],
) -> Result<Message, Error> {
    let response = Message::parse(packet)?;
    if response.header().id() != request.header().id() {
        return Err(DnsError::IdMismatch {
            request: request.header().id(),
            response: response.header().id(),
        }
        .into());
    }
    Ok(response)
}

/// Returns the wildcard address of the server address's family.
fn local_addr_for(server: SocketAddr) -> SocketAddr {
    if server.is_ipv4() {
        "0.0.0.0:0".parse().unwrap()
    } else {
        "[::]:0".parse().unwrap()
    }
}

//============ Error Types ===================================================

//------------ Error ---------------------------------------------------------

/// A query failed.
#[derive(Debug)]
pub enum Error {
    /// The network was unwilling.
    Io(io::Error),

    /// No response arrived in time.
    Timeout,

    /// The request didn't encode or the response was unacceptable.
    Dns(DnsError),
}

//--- From

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<DnsError> for Error {
    fn from(err: DnsError) -> Self {
        Error::Dns(err)
    }
}

//--- Display and Error

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::Io(ref err) => err.fmt(f),
            Error::Timeout => f.write_str("query timed out"),
            Error::Dns(ref err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn id_mismatch_is_rejected() {
        use crate::base::iana::Rtype;
        use crate::base::name::Name;
        use core::str::FromStr;

        let mut request =
            Message::query(Name::from_str("abc.com").unwrap(), Rtype::A);
        request.header_mut().set_id(0x1111);
        let mut response = request.reply();
        response.header_mut().set_id(0x2222);
        let packet = response.pack().unwrap();

        match check_response(&request, &packet) {
            Err(Error::Dns(DnsError::IdMismatch {
                request: 0x1111,
                response: 0x2222,
            })) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }
}

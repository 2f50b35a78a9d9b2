//! The interface between the server and the application.

use crate::base::message::Message;
use crate::base::DnsError;
use core::fmt;
use std::net::SocketAddr;

//------------ Transport -----------------------------------------------------

/// The transport a request arrived over.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Transport {
    /// The request arrived in a UDP datagram.
    Udp,

    /// The request arrived over a TCP connection.
    Tcp,
}

//--- Display

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            Transport::Udp => "udp",
            Transport::Tcp => "tcp",
        })
    }
}

//------------ RequestContext ------------------------------------------------

/// Information about a request beyond the request message itself.
///
/// A reference is handed to [`Resolver::resolve`] along with the parsed
/// request.
#[derive(Clone, Copy, Debug)]
pub struct RequestContext {
    /// The address the request was received from.
    peer: SocketAddr,

    /// The transport the request arrived over.
    transport: Transport,
}

impl RequestContext {
    /// Creates a new context from its components.
    pub fn new(peer: SocketAddr, transport: Transport) -> Self {
        RequestContext { peer, transport }
    }

    /// Returns the address the request was received from.
    pub fn peer(&self) -> SocketAddr {
        self.peer
    }

    /// Returns the transport the request arrived over.
    pub fn transport(&self) -> Transport {
        self.transport
    }
}

//------------ Resolver ------------------------------------------------------

/// A type that answers DNS requests.
///
/// This is the trait the application implements and hands to a
/// [`DnsServer`][super::DnsServer]. The server calls
/// [`resolve`][Self::resolve] once per request, possibly from several
/// tasks at once, so implementations must be safe to call concurrently.
///
/// Returning an error makes the server answer with SERVFAIL. The returned
/// message must carry the transaction ID of the request; the server
/// verifies this before sending and answers with SERVFAIL instead if the
/// IDs disagree. The easiest way to get all header fields right is to
/// start from [`Message::reply`].
pub trait Resolver: Send + Sync + 'static {
    /// Produces the response to a request.
    fn resolve(
        &self,
        request: &Message,
        ctx: &RequestContext,
    ) -> Result<Message, DnsError>;
}

//! The embedded DNS server framework.
//!
//! [`DnsServer`] listens on UDP and TCP and dispatches every received
//! query to a [`Resolver`] supplied by the application. Each UDP datagram
//! is handled on its own task; each TCP connection gets a task that
//! serves the length-framed queries on it until the peer closes the
//! connection or an idle timeout strikes.
//!
//! The framework deals with the failure modes so resolvers don't have to:
//! a request that doesn't parse is dropped, a resolver error turns into a
//! SERVFAIL response, and a response whose transaction ID doesn't match
//! the request is logged and replaced by SERVFAIL as well.

pub mod dgram;
pub mod service;
pub mod stream;

pub use self::service::{RequestContext, Resolver, Transport};

use crate::base::iana::Rcode;
use crate::base::message::Message;
use core::time::Duration;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, UdpSocket};
use tracing::{debug, warn};

//------------ Config --------------------------------------------------------

/// Configuration for a DNS server.
#[derive(Clone, Debug)]
pub struct Config {
    /// How long an idle TCP connection is kept open.
    tcp_idle_timeout: Duration,
}

impl Config {
    /// Creates a new, default config.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets how long an idle TCP connection is kept open.
    pub fn set_tcp_idle_timeout(&mut self, value: Duration) {
        self.tcp_idle_timeout = value;
    }
}

//--- Default

impl Default for Config {
    fn default() -> Self {
        Config {
            tcp_idle_timeout: Duration::from_secs(120),
        }
    }
}

//------------ DnsServer -----------------------------------------------------

/// A DNS server answering queries through a resolver.
///
/// The server itself is transport-agnostic; it is connected to the network
/// by running [`run`][Self::run] or, for more control over the sockets,
/// [`run_udp`][Self::run_udp] and [`run_tcp`][Self::run_tcp].
#[derive(Debug)]
pub struct DnsServer<R> {
    /// The resolver producing the answers.
    resolver: Arc<R>,

    /// The server configuration.
    config: Config,
}

impl<R: Resolver> DnsServer<R> {
    /// Creates a new server using the given resolver.
    pub fn new(resolver: R) -> Self {
        Self::with_config(resolver, Config::default())
    }

    /// Creates a new server with a given configuration.
    pub fn with_config(resolver: R, config: Config) -> Self {
        DnsServer {
            resolver: Arc::new(resolver),
            config,
        }
    }

    /// Binds to the given address and serves UDP and TCP queries forever.
    ///
    /// Returns only if one of the listening sockets fails.
    pub async fn run(&self, addr: SocketAddr) -> io::Result<()> {
        let udp = UdpSocket::bind(addr).await?;
        let tcp = TcpListener::bind(addr).await?;
        tokio::try_join!(self.run_udp(udp), self.run_tcp(tcp))?;
        Ok(())
    }

    /// Serves queries arriving on an already bound UDP socket.
    pub async fn run_udp(&self, sock: UdpSocket) -> io::Result<()> {
        dgram::run(sock, self.resolver.clone()).await
    }

    /// Serves connections arriving on an already bound TCP listener.
    pub async fn run_tcp(&self, listener: TcpListener) -> io::Result<()> {
        stream::run(
            listener,
            self.resolver.clone(),
            self.config.tcp_idle_timeout,
        )
        .await
    }
}

//------------ handle_request ------------------------------------------------

/// Produces the wire format response for one received packet.
///
/// Returns `None` if the packet doesn't parse as a DNS message, in which
/// case nothing is sent back at all.
fn handle_request<R: Resolver>(
    resolver: &R,
    packet: &[u8],
    ctx: &RequestContext,
) -> Option<Vec<u8>> {
    let request = match Message::parse(packet) {
        Ok(request) => request,
        Err(err) => {
            debug!(peer = %ctx.peer(), %err, "dropping malformed request");
            return None;
        }
    };

    let response = match resolver.resolve(&request, ctx) {
        Ok(response) => {
            if response.header().id() == request.header().id() {
                response
            } else {
                warn!(
                    peer = %ctx.peer(),
                    request_id = request.header().id(),
                    response_id = response.header().id(),
                    "resolver response has wrong transaction ID",
                );
                servfail(&request)
            }
        }
        Err(err) => {
            warn!(peer = %ctx.peer(), %err, "resolver failed");
            servfail(&request)
        }
    };

    match response.pack() {
        Ok(packet) => Some(packet),
        Err(err) => {
            warn!(peer = %ctx.peer(), %err, "response failed to encode");
            // The bare SERVFAIL skeleton always encodes.
            Some(servfail(&request).pack().expect("empty response packs"))
        }
    }
}

/// Creates a SERVFAIL response to the given request.
fn servfail(request: &Message) -> Message {
    let mut response = request.reply();
    response.header_mut().set_aa(false);
    response.header_mut().set_rcode(Rcode::ServFail);
    response
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::iana::Rtype;
    use crate::base::name::Name;
    use crate::base::DnsError;
    use core::str::FromStr;

    struct Broken;

    impl Resolver for Broken {
        fn resolve(
            &self,
            _request: &Message,
            _ctx: &RequestContext,
        ) -> Result<Message, DnsError> {
            Err(DnsError::Form(crate::base::FormError::new("nope")))
        }
    }

    struct WrongId;

    impl Resolver for WrongId {
        fn resolve(
            &self,
            request: &Message,
            _ctx: &RequestContext,
        ) -> Result<Message, DnsError> {
            let mut response = request.reply();
            response
                .header_mut()
                .set_id(request.header().id().wrapping_add(1));
            Ok(response)
        }
    }

    fn ctx() -> RequestContext {
        RequestContext::new(
            "127.0.0.1:53053".parse().unwrap(),
            Transport::Udp,
        )
    }

    fn query() -> Message {
        let mut query =
            Message::query(Name::from_str("abc.com").unwrap(), Rtype::A);
        query.header_mut().set_id(4711);
        query
    }

    #[test]
    fn resolver_error_turns_into_servfail() {
        let packet = query().pack().unwrap();
        let response =
            handle_request(&Broken, &packet, &ctx()).unwrap();
        let response = Message::parse(&response).unwrap();
        assert_eq!(response.header().rcode(), Rcode::ServFail);
        assert_eq!(response.header().id(), 4711);
    }

    #[test]
    fn wrong_id_turns_into_servfail() {
        let packet = query().pack().unwrap();
        let response =
            handle_request(&WrongId, &packet, &ctx()).unwrap();
        let response = Message::parse(&response).unwrap();
        assert_eq!(response.header().rcode(), Rcode::ServFail);
        assert_eq!(response.header().id(), 4711);
    }

    #[test]
    fn garbage_is_dropped() {
        assert!(handle_request(&Broken, b"\x01\x02", &ctx()).is_none());
    }
}

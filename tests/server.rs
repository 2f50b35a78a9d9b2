//! End-to-end tests of the server framework and query client.

use core::time::Duration;
use dnswire::base::iana::{Rcode, Rtype};
use dnswire::base::name::Name;
use dnswire::net::client;
use dnswire::net::server::{DnsServer, RequestContext, Resolver};
use dnswire::resolvers::{FixedResolver, ZoneResolver};
use dnswire::{DnsError, Message};
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use tokio::net::{TcpListener, UdpSocket};

const ZONE: &str = "\
$ORIGIN abc.com.\n\
$TTL 60\n\
@       IN  A       1.2.3.4\n\
@       IN  TXT     \"hello\"\n\
www     IN  CNAME   abc.com.\n\
";

const WAIT: Duration = Duration::from_secs(5);

/// Starts a server for the resolver on ephemeral localhost ports.
///
/// Returns the UDP and TCP addresses to direct queries at.
async fn spawn_server<R: Resolver>(
    resolver: R,
) -> (SocketAddr, SocketAddr) {
    let udp = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let tcp = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let udp_addr = udp.local_addr().unwrap();
    let tcp_addr = tcp.local_addr().unwrap();
    let server = Arc::new(DnsServer::new(resolver));
    let udp_server = server.clone();
    tokio::spawn(async move { udp_server.run_udp(udp).await });
    tokio::spawn(async move { server.run_tcp(tcp).await });
    (udp_addr, tcp_addr)
}

#[tokio::test]
async fn zone_resolver_over_udp() {
    let resolver = ZoneResolver::from_zone(ZONE).unwrap();
    let (udp, _) = spawn_server(resolver).await;

    let query = Message::query(Name::from_str("abc.com").unwrap(), Rtype::A);
    let response = client::query(&query, udp, WAIT).await.unwrap();
    assert_eq!(response.header().id(), query.header().id());
    assert!(response.header().qr());
    assert!(response.header().aa());
    assert_eq!(response.answers().len(), 1);
    assert_eq!(response.answers()[0].data().to_string(), "1.2.3.4");
}

#[tokio::test]
async fn zone_resolver_over_tcp() {
    let resolver = ZoneResolver::from_zone(ZONE).unwrap();
    let (_, tcp) = spawn_server(resolver).await;

    let query =
        Message::query(Name::from_str("abc.com").unwrap(), Rtype::ANY);
    let response = client::query_tcp(&query, tcp, WAIT).await.unwrap();
    assert_eq!(response.answers().len(), 2);

    // A second query on a fresh connection works as well.
    let query =
        Message::query(Name::from_str("www.abc.com").unwrap(), Rtype::A);
    let response = client::query_tcp(&query, tcp, WAIT).await.unwrap();
    assert_eq!(response.answers().len(), 1);
    assert_eq!(response.answers()[0].rtype(), Rtype::CNAME);
}

#[tokio::test]
async fn missing_name_gets_nxdomain() {
    let resolver = ZoneResolver::from_zone(ZONE).unwrap();
    let (udp, _) = spawn_server(resolver).await;

    let query =
        Message::query(Name::from_str("nope.abc.com").unwrap(), Rtype::A);
    let response = client::query(&query, udp, WAIT).await.unwrap();
    assert_eq!(response.header().rcode(), Rcode::NXDomain);
}

#[tokio::test]
async fn fixed_resolver_answers_anything() {
    let resolver =
        FixedResolver::from_zone(". 60 IN A 127.0.0.1\n").unwrap();
    let (udp, _) = spawn_server(resolver).await;

    let query = Message::query(
        Name::from_str("whatever.example.net").unwrap(),
        Rtype::A,
    );
    let response = client::query(&query, udp, WAIT).await.unwrap();
    assert_eq!(response.answers().len(), 1);
    assert_eq!(
        response.answers()[0].owner(),
        &Name::from_str("whatever.example.net").unwrap()
    );
}

#[tokio::test]
async fn failing_resolver_yields_servfail() {
    struct Failing;

    impl Resolver for Failing {
        fn resolve(
            &self,
            _request: &Message,
            _ctx: &RequestContext,
        ) -> Result<Message, DnsError> {
            Err(DnsError::Form(dnswire::base::FormError::new(
                "deliberate failure",
            )))
        }
    }

    let (udp, _) = spawn_server(Failing).await;
    let query = Message::query(Name::from_str("abc.com").unwrap(), Rtype::A);
    let response = client::query(&query, udp, WAIT).await.unwrap();
    assert_eq!(response.header().rcode(), Rcode::ServFail);
    assert_eq!(response.header().id(), query.header().id());
}

#[tokio::test]
async fn wrong_response_id_yields_servfail() {
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

    let (udp, _) = spawn_server(WrongId).await;
    let query = Message::query(Name::from_str("abc.com").unwrap(), Rtype::A);
    // The server catches the bad ID and sends SERVFAIL under the
    // request's ID, so the client accepts the response.
    let response = client::query(&query, udp, WAIT).await.unwrap();
    assert_eq!(response.header().rcode(), Rcode::ServFail);
    assert_eq!(response.header().id(), query.header().id());
}

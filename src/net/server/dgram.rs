//! The datagram transport of the server.

use super::service::{RequestContext, Resolver, Transport};
use crate::base::message::Message;
use std::io;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tracing::{debug, trace};

/// The largest datagram the server accepts.
///
/// EDNS allows a client to advertise up to 65535 octets, so the receive
/// buffer covers the full range.
const RECV_SIZE: usize = 65535;

/// The payload size assumed for clients that don't advertise one.
const DEFAULT_PAYLOAD_SIZE: usize = 512;

//------------ run -----------------------------------------------------------

/// Receives datagrams on the socket and answers them until it fails.
///
/// Every datagram is handled on its own task so a slow resolver doesn't
/// hold up the receive loop.
pub(super) async fn run<R: Resolver>(
    sock: UdpSocket,
    resolver: Arc<R>,
) -> io::Result<()> {
    let sock = Arc::new(sock);
    let mut buf = vec![0u8; RECV_SIZE];
    loop {
        let (len, peer) = sock.recv_from(&mut buf).await?;
        let packet = buf[..len].to_vec();
        let sock = sock.clone();
        let resolver = resolver.clone();
        tokio::spawn(async move {
            let ctx = RequestContext::new(peer, Transport::Udp);
            let Some(response) =
                super::handle_request(resolver.as_ref(), &packet, &ctx)
            else {
                return;
            };
            let response = clamp_response(&packet, response);
            if let Err(err) = sock.send_to(&response, peer).await {
                // The peer is gone or the network broke; nothing to do
                // but drop the response.
                debug!(%peer, %err, "failed to send response");
            } else {
                trace!(%peer, len = response.len(), "sent response");
            }
        });
    }
}

/// Truncates a response that exceeds the client's payload size.
///
/// The limit is the size advertised in the request's OPT record, or 512
/// octets without one. An overlong response is replaced by its header-only
/// truncated form, telling the client to retry over TCP.
fn clamp_response(request: &[u8], response: Vec<u8>) -> Vec<u8> {
    let limit = Message::parse(request)
        .ok()
        .and_then(|request| {
            request
                .opt()
                .map(|opt| usize::from(opt.udp_payload_size()))
        })
        .unwrap_or(DEFAULT_PAYLOAD_SIZE)
        .max(DEFAULT_PAYLOAD_SIZE);
    if response.len() <= limit {
        return response;
    }
    match Message::parse(&response) {
        Ok(message) => match message.truncated().pack() {
            Ok(packet) => packet,
            Err(_) => response,
        },
        Err(_) => response,
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::iana::{Class, Rtype};
    use crate::base::name::Name;
    use crate::base::record::Record;
    use crate::base::CharStr;
    use crate::rdata::rfc1035::Txt;
    use crate::rdata::RecordData;
    use core::str::FromStr;

    fn long_response(query: &Message) -> Vec<u8> {
        let mut response = query.reply();
        for _ in 0..4 {
            response.add_answer(Record::new(
                Name::from_str("abc.com").unwrap(),
                Class::IN,
                60,
                RecordData::Txt(Txt::single(
                    CharStr::from_octets(vec![b'x'; 255]).unwrap(),
                )),
            ));
        }
        response.pack().unwrap()
    }

    #[test]
    fn clamp_leaves_small_responses() {
        let query =
            Message::query(Name::from_str("abc.com").unwrap(), Rtype::A);
        let response = query.reply().pack().unwrap();
        let clamped =
            clamp_response(&query.pack().unwrap(), response.clone());
        assert_eq!(clamped, response);
    }

    #[test]
    fn clamp_truncates_long_responses() {
        let query =
            Message::query(Name::from_str("abc.com").unwrap(), Rtype::TXT);
        let response = long_response(&query);
        assert!(response.len() > 512);
        let clamped = clamp_response(&query.pack().unwrap(), response);
        let message = Message::parse(&clamped).unwrap();
        assert!(message.header().tc());
        assert!(message.answers().is_empty());
    }

    #[test]
    fn advertised_size_is_honored() {
        let mut query =
            Message::query(Name::from_str("abc.com").unwrap(), Rtype::TXT);
        query.add_opt(4096, 0, 0, false, Vec::new());
        let response = long_response(&query);
        let clamped =
            clamp_response(&query.pack().unwrap(), response.clone());
        assert_eq!(clamped, response);
    }
}

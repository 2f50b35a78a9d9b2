//! The stream transport of the server.

use super::service::{RequestContext, Resolver, Transport};
use core::time::Duration;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;
use tracing::{debug, trace};

//------------ run -----------------------------------------------------------

/// Accepts connections on the listener until it fails.
///
/// Every connection is served on its own task. Connections are dropped
/// when the peer closes them, when anything goes wrong on them, or when
/// they sit idle for longer than `idle_timeout`. The socket is owned by
/// the task, so every exit path releases it.
pub(super) async fn run<R: Resolver>(
    listener: TcpListener,
    resolver: Arc<R>,
    idle_timeout: Duration,
) -> io::Result<()> {
    loop {
        let (stream, peer) = listener.accept().await?;
        let resolver = resolver.clone();
        tokio::spawn(async move {
            match serve_conn(stream, peer, resolver, idle_timeout).await {
                Ok(()) => trace!(%peer, "connection closed"),
                Err(err) => {
                    // A broken connection only affects this one peer;
                    // the listener keeps running.
                    debug!(%peer, %err, "connection failed");
                }
            }
        });
    }
}

/// Serves all queries arriving on a single connection.
///
/// Messages are framed with a two octet length prefix in network byte
/// order as defined in section 4.2.2 of RFC 1035. Waiting for the next
/// query is bounded by the idle timeout; the timeout striking is a normal
/// way for a connection to end.
async fn serve_conn<R: Resolver>(
    mut stream: TcpStream,
    peer: SocketAddr,
    resolver: Arc<R>,
    idle_timeout: Duration,
) -> io::Result<()> {
    let ctx = RequestContext::new(peer, Transport::Tcp);
    loop {
        let len = match timeout(idle_timeout, stream.read_u16()).await {
            Ok(Ok(len)) => usize::from(len),
            // Idle for too long or the peer closed the connection.
            Err(_) => return Ok(()),
            Ok(Err(err)) if err.kind() == io::ErrorKind::UnexpectedEof => {
                return Ok(())
            }
            Ok(Err(err)) => return Err(err),
        };
        let mut packet = vec![0u8; len];
        timeout(idle_timeout, stream.read_exact(&mut packet))
            .await
            .map_err(|_| {
                io::Error::new(io::ErrorKind::TimedOut, "read timed out")
            })??;

        let Some(response) =
            super::handle_request(resolver.as_ref(), &packet, &ctx)
        else {
            // An unparseable message poisons the framing; drop the
            // connection rather than guessing where the next one starts.
            return Ok(());
        };
        stream.write_u16(response.len() as u16).await?;
        stream.write_all(&response).await?;
    }
}

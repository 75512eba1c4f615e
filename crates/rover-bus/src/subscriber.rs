use crate::message::{Header, Mode, SubscribeRequest};
use crate::{BusError, framing};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpStream, ToSocketAddrs};

/// Consumer side of the bus.
///
/// Connects to a `Hub`, announces a topic prefix and delivery mode, then
/// receives (topic, header, payload) triples until the connection closes.
pub struct Subscriber {
    reader: OwnedReadHalf,
    // Held so the hub-facing half stays open for the connection's lifetime.
    _writer: OwnedWriteHalf,
}

impl Subscriber {
    /// Connect to a hub and subscribe to every topic starting with `prefix`.
    pub async fn connect(
        addr: impl ToSocketAddrs,
        prefix: &str,
        mode: Mode,
    ) -> Result<Self, BusError> {
        let stream = TcpStream::connect(addr).await?;
        let (reader, mut writer) = stream.into_split();

        let request = SubscribeRequest {
            prefix: prefix.to_string(),
            mode,
        };
        let request_json = serde_json::to_vec(&request)?;
        framing::write_part(&mut writer, &request_json, framing::MAX_HEADER_SIZE).await?;
        tokio::io::AsyncWriteExt::flush(&mut writer).await?;

        Ok(Self {
            reader,
            _writer: writer,
        })
    }

    /// Receive the next message.
    ///
    /// Returns `BusError::ConnectionClosed` when the hub goes away. There is
    /// no redelivery: messages dropped by the hub while this subscriber was
    /// slow are gone (at-most-once, best-effort).
    pub async fn recv(&mut self) -> Result<(String, Header, Vec<u8>), BusError> {
        let (topic, header_json, payload) = framing::read_message(&mut self.reader).await?;
        let header: Header = serde_json::from_slice(&header_json)?;
        Ok((topic, header, payload))
    }
}

use crate::BusError;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

pub const MAX_TOPIC_SIZE: u32 = 256;
pub const MAX_HEADER_SIZE: u32 = 64 * 1024; // 64 KB
pub const MAX_PAYLOAD_SIZE: u32 = 64 * 1024 * 1024; // 64 MB

/// Write one length-prefixed part: 4-byte little-endian length, then bytes.
pub async fn write_part<W: AsyncWriteExt + Unpin>(
    writer: &mut W,
    bytes: &[u8],
    max: u32,
) -> Result<(), BusError> {
    let len = u32::try_from(bytes.len()).map_err(|_| BusError::MessageTooLarge(u32::MAX))?;

    if len > max {
        return Err(BusError::MessageTooLarge(len));
    }

    writer.write_all(&len.to_le_bytes()).await?;
    writer.write_all(bytes).await?;

    Ok(())
}

/// Read one length-prefixed part, validated against `max`.
///
/// Returns `BusError::ConnectionClosed` if EOF is encountered.
pub async fn read_part<R: AsyncReadExt + Unpin>(
    reader: &mut R,
    max: u32,
) -> Result<Vec<u8>, BusError> {
    let mut len_buf = [0u8; 4];
    match reader.read_exact(&mut len_buf).await {
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
            return Err(BusError::ConnectionClosed);
        }
        Err(e) => return Err(e.into()),
    }

    let len = u32::from_le_bytes(len_buf);

    if len > max {
        return Err(BusError::MessageTooLarge(len));
    }

    let mut bytes = vec![0u8; len as usize];
    match reader.read_exact(&mut bytes).await {
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
            return Err(BusError::ConnectionClosed);
        }
        Err(e) => return Err(e.into()),
    }

    Ok(bytes)
}

/// Write a full bus message: topic, JSON header, binary payload, each as
/// its own length-prefixed part so header and payload are never ambiguous.
pub async fn write_message<W: AsyncWriteExt + Unpin>(
    writer: &mut W,
    topic: &str,
    header_json: &[u8],
    payload: &[u8],
) -> Result<(), BusError> {
    write_part(writer, topic.as_bytes(), MAX_TOPIC_SIZE).await?;
    write_part(writer, header_json, MAX_HEADER_SIZE).await?;
    write_part(writer, payload, MAX_PAYLOAD_SIZE).await?;
    writer.flush().await?;
    Ok(())
}

/// Read a full bus message, returning (topic, header JSON, payload).
pub async fn read_message<R: AsyncReadExt + Unpin>(
    reader: &mut R,
) -> Result<(String, Vec<u8>, Vec<u8>), BusError> {
    let topic_bytes = read_part(reader, MAX_TOPIC_SIZE).await?;
    let topic = String::from_utf8(topic_bytes).map_err(|_| BusError::InvalidTopic)?;
    let header_json = read_part(reader, MAX_HEADER_SIZE).await?;
    let payload = read_part(reader, MAX_PAYLOAD_SIZE).await?;
    Ok((topic, header_json, payload))
}

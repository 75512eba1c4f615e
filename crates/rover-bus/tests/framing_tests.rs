use rover_bus::{BusError, framing};
use tokio::io::AsyncWriteExt;

#[tokio::test]
async fn test_message_roundtrip() {
    let (mut writer, mut reader) = tokio::io::duplex(1024 * 1024);

    let header_json = br#"{"seq":3,"ts_ns":99,"kind":"video"}"#;
    let payload = vec![1u8, 2, 3, 4, 5];

    framing::write_message(&mut writer, "video.raw", header_json, &payload)
        .await
        .expect("write failed");

    let (topic, header, got_payload) = framing::read_message(&mut reader)
        .await
        .expect("read failed");

    assert_eq!(topic, "video.raw");
    assert_eq!(header, header_json);
    assert_eq!(got_payload, payload);
}

#[tokio::test]
async fn test_multiple_messages_in_sequence() {
    let (mut writer, mut reader) = tokio::io::duplex(1024 * 1024);

    for i in 0..3u8 {
        framing::write_message(&mut writer, "t", b"{}", &[i])
            .await
            .unwrap();
    }

    for i in 0..3u8 {
        let (_, _, payload) = framing::read_message(&mut reader).await.unwrap();
        assert_eq!(payload, vec![i]);
    }
}

#[tokio::test]
async fn test_empty_payload() {
    let (mut writer, mut reader) = tokio::io::duplex(4096);

    framing::write_message(&mut writer, "drive.cmd", b"{}", &[])
        .await
        .unwrap();

    let (topic, _, payload) = framing::read_message(&mut reader).await.unwrap();
    assert_eq!(topic, "drive.cmd");
    assert!(payload.is_empty());
}

#[tokio::test]
async fn test_oversized_topic_rejected() {
    let (mut writer, _reader) = tokio::io::duplex(4096);

    let topic = "x".repeat(framing::MAX_TOPIC_SIZE as usize + 1);
    let result = framing::write_message(&mut writer, &topic, b"{}", &[]).await;

    assert!(matches!(result, Err(BusError::MessageTooLarge(_))));
}

#[tokio::test]
async fn test_oversized_incoming_part_rejected() {
    let (mut writer, mut reader) = tokio::io::duplex(4096);

    // Hand-craft a part claiming to be larger than the topic limit.
    let bogus_len = (framing::MAX_TOPIC_SIZE + 1).to_le_bytes();
    writer.write_all(&bogus_len).await.unwrap();

    let result = framing::read_message(&mut reader).await;
    assert!(matches!(result, Err(BusError::MessageTooLarge(_))));
}

#[tokio::test]
async fn test_eof_maps_to_connection_closed() {
    let (writer, mut reader) = tokio::io::duplex(4096);
    drop(writer);

    let result = framing::read_message(&mut reader).await;
    assert!(matches!(result, Err(BusError::ConnectionClosed)));
}

#[tokio::test]
async fn test_non_utf8_topic_rejected() {
    let (mut writer, mut reader) = tokio::io::duplex(4096);

    framing::write_part(&mut writer, &[0xff, 0xfe], framing::MAX_TOPIC_SIZE)
        .await
        .unwrap();

    let result = framing::read_message(&mut reader).await;
    assert!(matches!(result, Err(BusError::InvalidTopic)));
}

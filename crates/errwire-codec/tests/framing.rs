use errwire_codec::{
    FrameError, encode, encode_response,
    framing::{MAX_FRAME_SIZE, read_frame, read_response, write_frame, write_response},
};
use errwire_core::{ErrorCode, ErrorResponse};
use tempfile::tempdir;
use tokio::io::{AsyncWriteExt, duplex, sink};

#[tokio::test]
async fn frame_carries_encoded_payload_behind_length_header() {
    let response = ErrorResponse::new("invoice expired", ErrorCode::InvalidRequestError);
    let payload = encode_response(&response);

    let mut stream = Vec::new();
    write_frame(&mut stream, &payload)
        .await
        .expect("write should succeed");

    assert_eq!(stream[..4], (payload.len() as u32).to_be_bytes());
    assert_eq!(stream[4..], payload[..]);

    let mut reader = stream.as_slice();
    let body = read_frame(&mut reader).await.expect("read should succeed");
    assert_eq!(body, payload);
    assert!(reader.is_empty());
}

#[tokio::test]
async fn response_stream_roundtrip() {
    let (mut tx, mut rx) = duplex(256);
    let sent = vec![
        ErrorResponse::new("missing invoice", ErrorCode::InvalidRequestError),
        ErrorResponse::new("", ErrorCode::AuthError),
        ErrorResponse {
            message: "from a newer server".to_string(),
            error_code: 12,
        },
    ];

    let to_send = sent.clone();
    let write_task = tokio::spawn(async move {
        for response in &to_send {
            write_response(&mut tx, response).await?;
        }
        Ok::<_, FrameError>(())
    });

    let mut received = Vec::new();
    for _ in 0..sent.len() {
        received.push(read_response(&mut rx).await.expect("read should succeed"));
    }

    write_task
        .await
        .expect("join should succeed")
        .expect("write should succeed");

    assert_eq!(received[0], sent[0]);
    assert_eq!(received[1], sent[1]);
    assert_eq!(
        received[2],
        ErrorResponse::new("from a newer server", ErrorCode::UnknownError)
    );
}

#[tokio::test]
async fn empty_unknown_error_is_an_empty_frame() {
    let mut stream = Vec::new();
    write_response(&mut stream, &ErrorResponse::default())
        .await
        .expect("write should succeed");
    assert_eq!(stream, [0_u8; 4]);

    let decoded = read_response(&mut stream.as_slice())
        .await
        .expect("read should succeed");
    assert_eq!(decoded.code(), ErrorCode::UnknownError);
}

#[tokio::test]
async fn response_frames_persist_to_file() {
    let tmp = tempdir().expect("tempdir should be created");
    let path = tmp.path().join("errors.bin");

    let mut file = tokio::fs::File::create(&path)
        .await
        .expect("file should be created");
    write_response(
        &mut file,
        &ErrorResponse::new("peer disconnected", ErrorCode::LightningError),
    )
    .await
    .expect("write should succeed");
    drop(file);

    let mut file = tokio::fs::File::open(&path)
        .await
        .expect("file should open");
    let decoded = read_response(&mut file).await.expect("read should succeed");
    assert_eq!(
        decoded,
        ErrorResponse::new("peer disconnected", ErrorCode::LightningError)
    );
}

#[tokio::test]
async fn oversized_message_is_refused_before_writing() {
    let response = ErrorResponse::new(
        "x".repeat(MAX_FRAME_SIZE as usize),
        ErrorCode::InternalServerError,
    );

    let err = write_response(&mut sink(), &response)
        .await
        .expect_err("oversized payload must fail");

    match err {
        FrameError::FrameTooLarge { size, max } => {
            assert!(size > MAX_FRAME_SIZE);
            assert_eq!(max, MAX_FRAME_SIZE);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn oversized_header_is_rejected() {
    let (mut tx, mut rx) = duplex(16);
    tx.write_all(&(MAX_FRAME_SIZE + 1).to_be_bytes())
        .await
        .expect("header write should succeed");

    let err = read_response(&mut rx)
        .await
        .expect_err("oversized header must fail");

    match err {
        FrameError::FrameTooLarge { size, max } => {
            assert_eq!(size, MAX_FRAME_SIZE + 1);
            assert_eq!(max, MAX_FRAME_SIZE);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn stream_ending_inside_payload_is_eof() {
    let payload = encode("route not found", ErrorCode::LightningError);
    let mut stream = Vec::new();
    write_frame(&mut stream, &payload)
        .await
        .expect("write should succeed");
    stream.truncate(stream.len() - 3);

    let err = read_response(&mut stream.as_slice())
        .await
        .expect_err("truncated frame should fail");

    match err {
        FrameError::Io(io_err) => {
            assert_eq!(io_err.kind(), std::io::ErrorKind::UnexpectedEof);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn corrupt_frame_payload_is_decode_error() {
    let mut stream = Vec::new();
    write_frame(&mut stream, &[0x0a, 0x05, b'a'])
        .await
        .expect("write should succeed");

    let err = read_response(&mut stream.as_slice())
        .await
        .expect_err("corrupt payload should fail");

    match err {
        FrameError::Decode(_) => {}
        other => panic!("unexpected error: {other}"),
    }
}

//! Length-prefixed streams of error payloads.
//!
//! Each frame is a big-endian `u32` byte count followed by one binary [`ErrorResponse`].

use errwire_core::ErrorResponse;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::{FrameError, decode, encode_response};

/// Largest payload a single frame may carry.
pub const MAX_FRAME_SIZE: u32 = 1024 * 1024;

const HEADER_LEN: usize = 4;

fn checked_frame_len(len: usize) -> Result<u32, FrameError> {
    match u32::try_from(len) {
        Ok(size) if size <= MAX_FRAME_SIZE => Ok(size),
        Ok(size) => Err(FrameError::FrameTooLarge {
            size,
            max: MAX_FRAME_SIZE,
        }),
        Err(_) => Err(FrameError::FrameTooLarge {
            size: u32::MAX,
            max: MAX_FRAME_SIZE,
        }),
    }
}

/// Writes `payload` behind its length header in a single buffered write.
pub async fn write_frame<W: AsyncWrite + Unpin>(
    writer: &mut W,
    payload: &[u8],
) -> Result<(), FrameError> {
    let size = checked_frame_len(payload.len())?;

    let mut frame = Vec::with_capacity(HEADER_LEN + payload.len());
    frame.extend_from_slice(&size.to_be_bytes());
    frame.extend_from_slice(payload);

    writer.write_all(&frame).await?;
    writer.flush().await?;
    Ok(())
}

/// Reads the next frame body. A stream ending inside a frame is `UnexpectedEof`.
pub async fn read_frame<R: AsyncRead + Unpin>(reader: &mut R) -> Result<Vec<u8>, FrameError> {
    let announced = reader.read_u32().await?;
    let size = checked_frame_len(announced as usize).inspect_err(|_| {
        tracing::debug!(size = announced, max = MAX_FRAME_SIZE, "rejecting oversized frame");
    })?;

    let mut payload = vec![0_u8; size as usize];
    reader.read_exact(&mut payload).await?;
    Ok(payload)
}

/// Writes one error payload as a binary frame.
pub async fn write_response<W: AsyncWrite + Unpin>(
    writer: &mut W,
    response: &ErrorResponse,
) -> Result<(), FrameError> {
    write_frame(writer, &encode_response(response)).await
}

/// Reads and decodes one binary error payload frame, applying the unknown-code fallback.
pub async fn read_response<R: AsyncRead + Unpin>(
    reader: &mut R,
) -> Result<ErrorResponse, FrameError> {
    let frame = read_frame(reader).await?;
    Ok(decode(&frame)?)
}

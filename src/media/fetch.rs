// SPDX-License-Identifier: MPL-2.0
//! Remote content retrieval.
//!
//! All network access of the detail view goes through this module: the
//! thumbnail shown by the image detail view and the raw bytes previewed by
//! the blob frame. Functions return [`FetchError`] so completions can be
//! carried inside UI messages.

use crate::error::FetchError;
use iced::widget::image;
use image_rs::GenericImageView;
use reqwest::Url;

pub type FetchResult<T> = std::result::Result<T, FetchError>;

const USER_AGENT: &str = concat!("BlobLens/", env!("CARGO_PKG_VERSION"));
const MAX_REDIRECTS: usize = 10;

/// A decoded image ready to be handed to an Iced image widget.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub handle: image::Handle,
    pub width: u32,
    pub height: u32,
}

fn client() -> FetchResult<reqwest::Client> {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| FetchError::Transport(e.to_string()))
}

async fn send(url: Url) -> FetchResult<reqwest::Response> {
    let response = client()?.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Http {
            status: status.as_u16(),
        });
    }
    Ok(response)
}

/// Downloads the body at `url`, failing on non-success statuses.
pub async fn fetch_bytes(url: Url) -> FetchResult<Vec<u8>> {
    let body = send(url).await?.bytes().await?;
    Ok(body.to_vec())
}

/// First bytes of a body, and the length the server announced for it.
#[derive(Debug, Clone, PartialEq, Eq)]
struct BodyHead {
    bytes: Vec<u8>,
    announced_len: Option<u64>,
}

/// Reads at most `max` bytes of the body at `url`, then drops the
/// connection without waiting for the rest.
async fn fetch_head(url: Url, max: usize) -> FetchResult<BodyHead> {
    let mut response = send(url).await?;
    let announced_len = response.content_length();

    let mut bytes = Vec::with_capacity(max.min(64 * 1024));
    while bytes.len() < max {
        let Some(chunk) = response.chunk().await? else {
            break;
        };
        let take = chunk.len().min(max - bytes.len());
        bytes.extend_from_slice(&chunk[..take]);
    }
    Ok(BodyHead {
        bytes,
        announced_len,
    })
}

/// Decodes encoded image bytes (PNG, JPEG, GIF, WebP) into RGBA pixels.
pub fn decode_image(bytes: &[u8]) -> FetchResult<LoadedImage> {
    let img = image_rs::load_from_memory(bytes)?;
    let (width, height) = img.dimensions();
    let pixels = img.to_rgba8().into_vec();

    Ok(LoadedImage {
        handle: image::Handle::from_rgba(width, height, pixels),
        width,
        height,
    })
}

/// Downloads and decodes the image at `url`.
///
/// Decoding runs on the blocking pool so large thumbnails do not stall the
/// executor.
pub async fn fetch_image(url: Url) -> FetchResult<LoadedImage> {
    let bytes = fetch_bytes(url).await?;
    tokio::task::spawn_blocking(move || decode_image(&bytes))
        .await
        .map_err(|e| FetchError::Decode(e.to_string()))?
}

/// What the blob frame shows for a body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FramePreview {
    /// UTF-8 text, cut at `limit` bytes on a character boundary.
    Text { text: String, truncated: bool },
    /// Anything that is not text. `len` is the full body length, when known.
    Binary { len: Option<u64> },
}

/// Classifies `bytes` as previewable text or opaque binary.
///
/// A body is text when its first `limit` bytes are valid UTF-8 (a multi-byte
/// sequence cut by the limit is tolerated) and contain no NUL byte. `bytes`
/// may be a prefix of the body: only when it fits within `limit` is it taken
/// as the whole body, so a binary length is reported only in that case.
#[must_use]
pub fn classify_preview(bytes: &[u8], limit: usize) -> FramePreview {
    let head = &bytes[..bytes.len().min(limit)];
    let binary = FramePreview::Binary {
        len: (bytes.len() <= limit).then_some(bytes.len() as u64),
    };
    if head.contains(&0) {
        return binary;
    }

    let text = match std::str::from_utf8(head) {
        Ok(text) => text,
        // Incomplete trailing sequence: only acceptable where the limit cut it.
        Err(err) if err.error_len().is_none() && head.len() < bytes.len() => {
            match std::str::from_utf8(&head[..err.valid_up_to()]) {
                Ok(text) => text,
                Err(_) => return binary,
            }
        }
        Err(_) => return binary,
    };

    FramePreview::Text {
        text: text.to_string(),
        truncated: bytes.len() > head.len(),
    }
}

/// Reads the start of `url` and classifies it for the blob frame.
///
/// Only `limit + 1` bytes are read: one past the limit tells a truncated
/// body apart from one that ends exactly there.
pub async fn fetch_preview(url: Url, limit: usize) -> FetchResult<FramePreview> {
    let head = fetch_head(url, limit.saturating_add(1)).await?;
    Ok(match classify_preview(&head.bytes, limit) {
        FramePreview::Binary { len: None } => FramePreview::Binary {
            len: head.announced_len,
        },
        preview => preview,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_rs::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves one response announcing `announced` bytes, writes `body`, then
    /// keeps the connection open without sending the rest.
    async fn stalling_server(announced: u64, body: Vec<u8>) -> Url {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind listener");
        let addr = listener.local_addr().expect("listener has no address");
        tokio::spawn(async move {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            let mut request = [0u8; 1024];
            let _ = socket.read(&mut request).await;
            let header = format!(
                "HTTP/1.1 200 OK\r\nContent-Length: {announced}\r\nContent-Type: application/octet-stream\r\n\r\n"
            );
            let _ = socket.write_all(header.as_bytes()).await;
            let _ = socket.write_all(&body).await;
            let _ = socket.flush().await;
            tokio::time::sleep(Duration::from_secs(30)).await;
        });
        Url::parse(&format!("http://{addr}/ui/?b=sha1-big")).expect("valid url")
    }

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let image = RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 255]));
        let mut cursor = Cursor::new(Vec::new());
        image
            .write_to(&mut cursor, ImageFormat::Png)
            .expect("failed to encode png");
        cursor.into_inner()
    }

    #[test]
    fn decode_image_reports_dimensions() {
        let loaded = decode_image(&png_bytes(4, 3)).expect("decode failed");
        assert_eq!((loaded.width, loaded.height), (4, 3));
    }

    #[test]
    fn decode_garbage_is_decode_error() {
        let err = decode_image(b"definitely not an image").unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn short_text_is_not_truncated() {
        assert_eq!(
            classify_preview(b"hello world", 64),
            FramePreview::Text {
                text: "hello world".into(),
                truncated: false
            }
        );
    }

    #[test]
    fn long_text_is_truncated_at_limit() {
        assert_eq!(
            classify_preview(b"abcdefgh", 3),
            FramePreview::Text {
                text: "abc".into(),
                truncated: true
            }
        );
    }

    #[test]
    fn limit_splitting_a_character_backs_off() {
        let text = "aé".as_bytes(); // 'é' is two bytes
        assert_eq!(
            classify_preview(text, 2),
            FramePreview::Text {
                text: "a".into(),
                truncated: true
            }
        );
    }

    #[test]
    fn nul_bytes_mean_binary() {
        assert_eq!(
            classify_preview(&[0x89, b'P', b'N', b'G', 0, 0], 64),
            FramePreview::Binary { len: Some(6) }
        );
    }

    #[test]
    fn invalid_utf8_means_binary() {
        assert_eq!(
            classify_preview(&[0xff, 0xfe, b'a'], 64),
            FramePreview::Binary { len: Some(3) }
        );
    }

    #[test]
    fn png_body_is_binary() {
        let bytes = png_bytes(2, 2);
        assert_eq!(
            classify_preview(&bytes, 4096),
            FramePreview::Binary {
                len: Some(bytes.len() as u64)
            }
        );
    }

    #[test]
    fn binary_prefix_has_unknown_length() {
        assert_eq!(
            classify_preview(&[0, 1, 2, 3, 4], 4),
            FramePreview::Binary { len: None }
        );
    }

    #[tokio::test]
    async fn preview_returns_once_limit_is_reached() {
        let url = stalling_server(100_000_000, vec![b'a'; 4096]).await;
        let preview = tokio::time::timeout(Duration::from_secs(3), fetch_preview(url, 16))
            .await
            .expect("preview waited for the whole body")
            .expect("preview failed");
        assert_eq!(
            preview,
            FramePreview::Text {
                text: "a".repeat(16),
                truncated: true
            }
        );
    }

    #[tokio::test]
    async fn binary_preview_reports_announced_length() {
        let url = stalling_server(1_000_000, vec![0; 4096]).await;
        let preview = tokio::time::timeout(Duration::from_secs(3), fetch_preview(url, 64))
            .await
            .expect("preview waited for the whole body")
            .expect("preview failed");
        assert_eq!(
            preview,
            FramePreview::Binary {
                len: Some(1_000_000)
            }
        );
    }

    #[tokio::test]
    async fn unreachable_host_is_transport_error() {
        let url = Url::parse("http://127.0.0.1:9/unreachable").unwrap();
        let err = fetch_bytes(url).await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
    }
}

//! Single-chunk retrieval.

use crate::download::{ChunkResult, FetchRange};
use crate::error::{Error, Result};
use crate::utils::content_length::get_content_range_start;

use reqwest::{header::RANGE, StatusCode, Url};
use reqwest_middleware::ClientWithMiddleware;
use tracing::debug;

/// Fetch `range` from `url` with a `Range` request.
///
/// `206 Partial Content` bytes are placed at the start reported by
/// `Content-Range`, or at `range.start` when the header is absent. A `200 OK`
/// means the server ignored the range and sent the whole resource, so the
/// bytes are placed at offset zero. Any other status is an
/// [`Error::Server`].
pub async fn fetch(
    client: &ClientWithMiddleware,
    url: &Url,
    range: FetchRange,
) -> Result<ChunkResult> {
    debug!("Fetching {} with {}", range, range.to_header_value());
    let res = client
        .get(url.clone())
        .header(RANGE, range.to_header_value())
        .send()
        .await?;

    let offset = match res.status() {
        StatusCode::PARTIAL_CONTENT => {
            get_content_range_start(res.headers()).unwrap_or(range.start)
        }
        StatusCode::OK => {
            debug!("Server ignored the range and sent the full resource");
            0
        }
        status => return Err(Error::Server { status }),
    };

    let bytes = res.bytes().await?;
    if bytes.is_empty() {
        return Err(Error::EmptyChunk { range });
    }
    debug!("Received {} bytes at offset {}", bytes.len(), offset);

    Ok(ChunkResult::new(offset, bytes.to_vec()))
}

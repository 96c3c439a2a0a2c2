//! Total size discovery.

use crate::error::{Error, Result};
use crate::utils::content_length::{get_content_length, parse_content_range_total};

use reqwest::{header::CONTENT_RANGE, StatusCode, Url};
use reqwest_middleware::ClientWithMiddleware;
use tracing::debug;

/// Learn the total size of the resource at `url`.
///
/// A plain GET is issued and only the headers are inspected; the body is
/// dropped unread. Both `200 OK` and `206 Partial Content` are accepted. For a
/// partial answer the total from `Content-Range` is preferred, since its
/// `Content-Length` only describes the part that was sent.
pub async fn probe(client: &ClientWithMiddleware, url: &Url) -> Result<u64> {
    debug!("Probing size of {}", url);
    let res = client.get(url.clone()).send().await?;

    let status = res.status();
    let headers = res.headers();
    let size = match status {
        StatusCode::OK => get_content_length(headers),
        StatusCode::PARTIAL_CONTENT => headers
            .get(CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_range_total)
            .or_else(|| get_content_length(headers)),
        status => return Err(Error::Server { status }),
    };

    let size = size.ok_or_else(|| {
        Error::SizeUnavailable(format!(
            "{} answered {} without a valid Content-Length",
            url, status
        ))
    })?;
    debug!("{} has {} bytes", url, size);

    Ok(size)
}

pub mod dash;
pub mod error;
pub mod fetch;
pub mod hls;

pub use error::{TsumugiError, TsumugiResult};

use reqwest::Client;

use crate::dash::Mpd;

/// Classify raw manifest content and decode it.
///
/// The decoded tree still carries raw BaseURL fragments; run
/// [`Mpd::resolve_urls`] with the manifest's fetch location to obtain
/// absolute segment bases. [`load_from_url`] does both.
pub fn load_from_text(content: &str) -> TsumugiResult<Mpd> {
    let content = content.trim();

    if content.contains(hls::EXT_M3U) {
        tracing::debug!("Content looks like an HLS playlist");
        return Err(TsumugiError::HlsNotSupported);
    }

    if content.contains("<MPD") && content.contains("</MPD>") {
        return dash::parse(content);
    }

    Err(TsumugiError::UnsupportedFormat)
}

/// Fetch a manifest, decode it and resolve every Representation's segment
/// base against the fetch location.
pub async fn load_from_url(client: &Client, manifest_url: &str) -> TsumugiResult<Mpd> {
    let url = fetch::check_scheme(manifest_url)?;
    let content = fetch::fetch_manifest(client, &url).await?;

    let mut mpd = load_from_text(&content)?;
    mpd.resolve_urls(url.as_str());
    Ok(mpd)
}

use reqwest::Client;
use url::Url;

use crate::error::{TsumugiError, TsumugiResult};

pub(crate) const MPD_ACCEPT: &str = "application/dash+xml,video/vnd.mpeg.dash.mpd";

/// Validate a manifest location before fetching it.
///
/// Only http and https are supported.
pub fn check_scheme(url: &str) -> TsumugiResult<Url> {
    let url = Url::parse(url)?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(TsumugiError::IncorrectUrlScheme(url.to_string())),
    }
}

/// One GET per load, no retries. Deadlines belong to the client passed in.
pub async fn fetch_manifest(client: &Client, url: &Url) -> TsumugiResult<String> {
    let response = client
        .get(url.clone())
        .header("Accept", MPD_ACCEPT)
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        if let Ok(body) = response.text().await {
            tracing::warn!("Error body: {body}");
        }
        return Err(TsumugiError::HttpError(status));
    }

    Ok(response.text().await?)
}

#[cfg(test)]
mod tests {
    use super::check_scheme;
    use crate::error::TsumugiError;

    #[test]
    fn test_check_scheme() {
        assert!(check_scheme("https://example.com/manifest.mpd").is_ok());
        assert!(check_scheme("http://example.com/manifest.mpd").is_ok());

        assert!(matches!(
            check_scheme("ftp://example.com/manifest.mpd"),
            Err(TsumugiError::IncorrectUrlScheme(_))
        ));
        assert!(matches!(
            check_scheme("not a url"),
            Err(TsumugiError::UrlParseError(_))
        ));
    }
}

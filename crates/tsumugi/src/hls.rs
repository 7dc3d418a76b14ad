//! HLS playlists are recognized by the format dispatcher but not modeled
//! yet; [`crate::load_from_text`] refuses them with
//! [`HlsNotSupported`](crate::TsumugiError::HlsNotSupported) until a
//! playlist model lands here.

/// First tag of an HLS playlist (RFC 8216, 4.3.1.1).
pub const EXT_M3U: &str = "#EXTM3U";

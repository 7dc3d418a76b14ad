//! # MPEG-DASH manifest model
//!
//! A decoded [`Mpd`] tree owns its [`Period`]s, which own their
//! [`AdaptationSet`]s, which own their [`Representation`]s and
//! [`ContentProtection`]s; there is no sharing between nodes. The tree is
//! built once by [`parse`], optionally mutated once by
//! [`Mpd::resolve_urls`], and read-only afterwards.
//!
//! Derived facts (codec names, DRM descriptors, media types, resolved
//! segment locations) are computed on demand by accessors on the nodes;
//! every accessor fails with a typed error instead of substituting a
//! placeholder when the manifest does not carry the fact.

pub mod codec;
pub mod encryption;
pub mod model;
pub mod url;

pub use codec::codec_repr;
pub use encryption::{DrmSystem, MediaEncryption, PLAYREADY_SCHEME_ID, WIDEVINE_SCHEME_ID};
pub use model::{
    AdaptationSet, AudioChannelConfiguration, ContentProtection, MediaType, Mpd, Period,
    Representation,
};
pub use url::{resolve_url, strip_url_filename};

use crate::error::TsumugiResult;

/// Decode an MPD document from its XML text.
///
/// Attributes the schema marks optional decode as `None` when absent, and
/// unknown elements are skipped; only structurally broken XML is an error.
pub fn parse(content: &str) -> TsumugiResult<Mpd> {
    Ok(quick_xml::de::from_str(content)?)
}

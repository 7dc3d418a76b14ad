use std::fmt;

use serde::Serialize;

use crate::error::{TsumugiError, TsumugiResult};

use super::model::{AdaptationSet, ContentProtection};

/// https://dashif.org/identifiers/content_protection/
pub const WIDEVINE_SCHEME_ID: &str = "urn:uuid:EDEF8BA9-79D6-4ACE-A3C8-27DCD51D21ED";
pub const PLAYREADY_SCHEME_ID: &str = "urn:uuid:9A04F079-9840-4286-AB92-E65BE0885F95";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DrmSystem {
    Cenc,
    Widevine,
    Playready,
}

impl fmt::Display for DrmSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DrmSystem::Cenc => "cenc",
            DrmSystem::Widevine => "widevine",
            DrmSystem::Playready => "playready",
        })
    }
}

/// Normalized DRM descriptor derived from a [`ContentProtection`] node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaEncryption {
    pub system: DrmSystem,
    /// Default key id for cenc, pssh blob for Widevine and PlayReady
    pub value: String,
    /// PlayReady only
    pub pro: Option<String>,
}

impl ContentProtection {
    /// Normalize this node into a [`MediaEncryption`].
    ///
    /// A `cenc:default_KID` wins over everything else, even when the
    /// schemeIdUri would also match a DRM system.
    pub fn encryption(&self) -> TsumugiResult<MediaEncryption> {
        if let Some(default_kid) = &self.default_kid {
            return Ok(MediaEncryption {
                system: DrmSystem::Cenc,
                value: default_kid.clone(),
                pro: None,
            });
        }

        let Some(scheme_id_uri) = self.scheme_id_uri.as_deref() else {
            return Err(TsumugiError::NoEncryptionInfo);
        };

        if scheme_id_uri.eq_ignore_ascii_case(WIDEVINE_SCHEME_ID) {
            return match &self.pssh {
                Some(pssh) => Ok(MediaEncryption {
                    system: DrmSystem::Widevine,
                    value: pssh.clone(),
                    pro: None,
                }),
                None => Err(TsumugiError::MissingWidevinePssh),
            };
        }

        if scheme_id_uri.eq_ignore_ascii_case(PLAYREADY_SCHEME_ID) {
            return match (&self.pssh, &self.pro) {
                (Some(pssh), Some(pro)) => Ok(MediaEncryption {
                    system: DrmSystem::Playready,
                    value: pssh.clone(),
                    pro: Some(pro.clone()),
                }),
                _ => Err(TsumugiError::MissingPlayReadyFields),
            };
        }

        Err(TsumugiError::UnrecognizedProtectionScheme(
            scheme_id_uri.to_string(),
        ))
    }
}

impl AdaptationSet {
    /// Collect a descriptor for every child ContentProtection.
    ///
    /// Fails on the first child that cannot be normalized; callers that want
    /// partial results must extract per node themselves.
    // TODO: decide whether a single malformed ContentProtection should be
    // skipped here instead of failing the whole set.
    pub fn encryptions(&self) -> TsumugiResult<Vec<MediaEncryption>> {
        self.content_protections
            .iter()
            .map(ContentProtection::encryption)
            .collect()
    }
}

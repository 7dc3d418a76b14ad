use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{TsumugiError, TsumugiResult};

use super::codec::codec_repr;

// Schema subset of:
// https://standards.iso.org/ittf/PubliclyAvailableStandards/MPEG-DASH_schema_files/DASH-MPD.xsd
// https://github.com/MPEGGroup/DASHSchema/blob/6th-Ed/DASH-MPD.xsd
//
// Every attribute the standard marks optional stays an `Option` here. Unknown
// elements and attributes are ignored during decoding.

/// Root of an MPD document.
///
/// Skipped: profiles, availabilityEndTime, minimumUpdatePeriod, minBufferTime.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Mpd {
    /// "static" or "dynamic"
    #[serde(rename = "@type")]
    pub mpd_type: Option<String>,
    #[serde(rename = "@availabilityStartTime")]
    pub availability_start_time: Option<String>,
    #[serde(rename = "@publishTime")]
    pub publish_time: Option<String>,
    /// Total length of the presentation
    #[serde(rename = "@mediaPresentationDuration")]
    pub media_presentation_duration: Option<String>,
    #[serde(rename = "@timeShiftBufferDepth")]
    pub time_shift_buffer_depth: Option<String>,
    #[serde(rename = "@maxSegmentDuration")]
    pub max_segment_duration: Option<String>,
    #[serde(rename = "BaseURL")]
    pub base_url: Option<String>,
    #[serde(rename = "Period", default)]
    pub periods: Vec<Period>,
}

impl Mpd {
    /// Whether the manifest describes a live stream.
    ///
    /// `MPD@type` must be present and either "static" or "dynamic",
    /// anything else is refused instead of being treated as static.
    pub fn is_live(&self) -> TsumugiResult<bool> {
        match self.mpd_type.as_deref() {
            Some(mpd_type) if mpd_type.eq_ignore_ascii_case("dynamic") => Ok(true),
            Some(mpd_type) if mpd_type.eq_ignore_ascii_case("static") => Ok(false),
            other => Err(TsumugiError::InvalidManifestType(
                other.map(str::to_string),
            )),
        }
    }
}

/// A time-bounded part of the presentation, usually one with a duration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Period {
    #[serde(rename = "@duration")]
    pub duration: Option<String>,
    #[serde(rename = "@id")]
    pub id: Option<String>,
    /// Combined with the MPD BaseURL
    #[serde(rename = "BaseURL")]
    pub base_url: Option<String>,
    #[serde(rename = "AdaptationSet", default)]
    pub adaptation_sets: Vec<AdaptationSet>,
}

/// One media track family: video, audio or subtitles.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdaptationSet {
    /// e.g. "audio/mp4"
    #[serde(rename = "@mimeType")]
    pub mime_type: Option<String>,
    /// e.g. "video", "audio", "text"
    #[serde(rename = "@contentType")]
    pub content_type: Option<String>,
    #[serde(rename = "@frameRate")]
    pub frame_rate: Option<String>,
    /// Combined with the Period and MPD BaseURL
    #[serde(rename = "BaseURL")]
    pub base_url: Option<String>,
    #[serde(rename = "@codecs")]
    pub codecs: Option<String>,
    #[serde(rename = "@width")]
    pub width: Option<u64>,
    #[serde(rename = "@height")]
    pub height: Option<u64>,
    #[serde(rename = "@lang")]
    pub lang: Option<String>,
    #[serde(rename = "Representation", default)]
    pub representations: Vec<Representation>,
    #[serde(rename = "ContentProtection", default)]
    pub content_protections: Vec<ContentProtection>,
    #[serde(rename = "AudioChannelConfiguration")]
    pub audio_channel_configuration: Option<AudioChannelConfiguration>,
}

impl AdaptationSet {
    /// Human readable codec name of this track family.
    pub fn codec(&self) -> TsumugiResult<String> {
        self.codecs
            .as_deref()
            .map(codec_repr)
            .ok_or(TsumugiError::NoCodecInfo)
    }

    /// Like [`AdaptationSet::codec`], but falls back to the first
    /// Representation with a non-empty `codecs` attribute.
    pub fn codec_any(&self) -> TsumugiResult<String> {
        self.codec().or_else(|_| {
            self.representations
                .iter()
                .find_map(|representation| {
                    representation
                        .codecs
                        .as_deref()
                        .filter(|codecs| !codecs.is_empty())
                        .map(codec_repr)
                })
                .ok_or(TsumugiError::NoCodecInfo)
        })
    }

    pub fn resolution(&self) -> TsumugiResult<String> {
        match (self.width, self.height) {
            (Some(width), Some(height)) => Ok(format!("{width}x{height}")),
            _ => Err(TsumugiError::NoResolutionInfo),
        }
    }

    /// Language tag of the track, mostly present on audio and subtitles.
    pub fn language(&self) -> TsumugiResult<String> {
        self.lang
            .as_deref()
            .or_else(|| {
                self.representations
                    .iter()
                    .find_map(|representation| {
                        representation.lang.as_deref().filter(|lang| !lang.is_empty())
                    })
            })
            .map(str::to_string)
            .ok_or(TsumugiError::NoLanguageInfo)
    }

    /// Channel count from `AudioChannelConfiguration@value`.
    ///
    /// A missing element and an unparseable value are distinct failures.
    pub fn audio_channels(&self) -> TsumugiResult<u32> {
        let value = self
            .audio_channel_configuration
            .as_ref()
            .and_then(|configuration| configuration.value.as_deref())
            .ok_or(TsumugiError::NoChannelInfo)?;
        value
            .parse()
            .map_err(|_| TsumugiError::InvalidChannelValue(value.to_string()))
    }

    /// Classify the track, scanning candidates in order: own mimeType,
    /// own contentType, then mimeType/contentType of each Representation.
    /// The first candidate present decides, even if it fails to map.
    pub fn media_type(&self) -> TsumugiResult<MediaType> {
        let own = [
            self.mime_type.as_deref().map(mime_main_type),
            self.content_type.as_deref(),
        ];
        let inherited = self.representations.iter().flat_map(|representation| {
            [
                representation.mime_type.as_deref().map(mime_main_type),
                representation.content_type.as_deref(),
            ]
        });

        own.into_iter()
            .chain(inherited)
            .flatten()
            .next()
            .ok_or(TsumugiError::UnknownMediaType(None))?
            .parse()
    }
}

/// One concrete quality variant of an AdaptationSet.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Representation {
    #[serde(rename = "@id")]
    pub id: Option<String>,
    #[serde(rename = "@frameRate")]
    pub frame_rate: Option<String>,
    #[serde(rename = "@mimeType")]
    pub mime_type: Option<String>,
    #[serde(rename = "@contentType")]
    pub content_type: Option<String>,
    /// Bytes per second
    #[serde(rename = "@bandwidth")]
    pub bandwidth: Option<u64>,
    #[serde(rename = "@codecs")]
    pub codecs: Option<String>,
    #[serde(rename = "@lang")]
    pub lang: Option<String>,
    #[serde(rename = "@width")]
    pub width: Option<u64>,
    #[serde(rename = "@height")]
    pub height: Option<u64>,
    /// Combined with the AdaptationSet, Period and MPD BaseURL
    #[serde(rename = "BaseURL")]
    pub base_url: Option<String>,
    /// Absolute segment base location, filled by [`Mpd::resolve_urls`].
    #[serde(skip)]
    pub resolved_url: Option<String>,
}

impl Representation {
    pub fn codec(&self) -> TsumugiResult<String> {
        self.codecs
            .as_deref()
            .map(codec_repr)
            .ok_or(TsumugiError::NoCodecInfo)
    }

    pub fn resolution(&self) -> TsumugiResult<String> {
        match (self.width, self.height) {
            (Some(width), Some(height)) => Ok(format!("{width}x{height}")),
            _ => Err(TsumugiError::NoResolutionInfo),
        }
    }

    /// Bandwidth in kbps.
    // The manifest value is in bytes per second.
    // TODO: confirm with stakeholders whether this should be * 8 / 1000
    // instead of / 1024 before anything displays the number as kbps.
    pub fn bandwidth_kbps(&self) -> TsumugiResult<u64> {
        self.bandwidth
            .map(|bandwidth| bandwidth / 1024)
            .ok_or(TsumugiError::NoBandwidthInfo)
    }
}

/// One DRM scheme declaration attached to an AdaptationSet.
///
/// https://dashif.org/identifiers/content_protection/
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentProtection {
    /// Identifies the encryption scheme
    #[serde(rename = "@schemeIdUri")]
    pub scheme_id_uri: Option<String>,
    #[serde(rename = "@value")]
    pub value: Option<String>,
    /// Default encryption key id
    #[serde(rename = "@default_KID")]
    pub default_kid: Option<String>,
    /// Base64 initialization blob, mostly Widevine
    #[serde(rename = "pssh")]
    pub pssh: Option<String>,
    /// PlayReady protection header
    #[serde(rename = "pro")]
    pub pro: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AudioChannelConfiguration {
    #[serde(rename = "@value")]
    pub value: Option<String>,
}

/// Closed classification of a media track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Video,
    Audio,
    #[serde(rename = "text")]
    Subtitle,
}

impl FromStr for MediaType {
    type Err = TsumugiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "video" => Ok(MediaType::Video),
            "audio" => Ok(MediaType::Audio),
            "text" => Ok(MediaType::Subtitle),
            _ => Err(TsumugiError::UnknownMediaType(Some(s.to_string()))),
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MediaType::Video => "video",
            MediaType::Audio => "audio",
            MediaType::Subtitle => "text",
        })
    }
}

fn mime_main_type(mime: &str) -> &str {
    mime.split('/').next().unwrap_or(mime)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_live() {
        let mpd = Mpd {
            mpd_type: Some("Dynamic".to_string()),
            ..Default::default()
        };
        assert!(mpd.is_live().unwrap());

        let mpd = Mpd {
            mpd_type: Some("STATIC".to_string()),
            ..Default::default()
        };
        assert!(!mpd.is_live().unwrap());
    }

    #[test]
    fn test_is_live_rejects_unknown_and_absent_type() {
        let mpd = Mpd {
            mpd_type: Some("paused".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            mpd.is_live(),
            Err(TsumugiError::InvalidManifestType(Some(_)))
        ));

        let mpd = Mpd::default();
        assert!(matches!(
            mpd.is_live(),
            Err(TsumugiError::InvalidManifestType(None))
        ));
    }

    #[test]
    fn test_resolution() {
        let representation = Representation {
            width: Some(1920),
            height: Some(1080),
            ..Default::default()
        };
        assert_eq!(representation.resolution().unwrap(), "1920x1080");

        let representation = Representation {
            height: Some(1080),
            ..Default::default()
        };
        assert!(matches!(
            representation.resolution(),
            Err(TsumugiError::NoResolutionInfo)
        ));
    }

    #[test]
    fn test_language_falls_back_to_representations() {
        let adaptation = AdaptationSet {
            representations: vec![
                Representation::default(),
                Representation {
                    lang: Some("ja".to_string()),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        assert_eq!(adaptation.language().unwrap(), "ja");

        let adaptation = AdaptationSet {
            lang: Some("en".to_string()),
            ..adaptation
        };
        assert_eq!(adaptation.language().unwrap(), "en");

        assert!(matches!(
            AdaptationSet::default().language(),
            Err(TsumugiError::NoLanguageInfo)
        ));
    }

    #[test]
    fn test_codec_any_falls_back_to_representations() {
        let adaptation = AdaptationSet {
            representations: vec![Representation {
                codecs: Some("avc1.640028".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        };
        assert!(matches!(
            adaptation.codec(),
            Err(TsumugiError::NoCodecInfo)
        ));
        assert_eq!(adaptation.codec_any().unwrap(), "H.264");

        let adaptation = AdaptationSet {
            codecs: Some("mp4a.40.2".to_string()),
            ..adaptation
        };
        assert_eq!(adaptation.codec_any().unwrap(), "AAC-LC");
    }

    #[test]
    fn test_audio_channels() {
        let adaptation = AdaptationSet {
            audio_channel_configuration: Some(AudioChannelConfiguration {
                value: Some("2".to_string()),
            }),
            ..Default::default()
        };
        assert_eq!(adaptation.audio_channels().unwrap(), 2);

        assert!(matches!(
            AdaptationSet::default().audio_channels(),
            Err(TsumugiError::NoChannelInfo)
        ));

        let adaptation = AdaptationSet {
            audio_channel_configuration: Some(AudioChannelConfiguration {
                value: Some("stereo".to_string()),
            }),
            ..Default::default()
        };
        assert!(matches!(
            adaptation.audio_channels(),
            Err(TsumugiError::InvalidChannelValue(_))
        ));
    }

    #[test]
    fn test_bandwidth_kbps() {
        let representation = Representation {
            bandwidth: Some(5_000_000),
            ..Default::default()
        };
        assert_eq!(representation.bandwidth_kbps().unwrap(), 4882);

        assert!(matches!(
            Representation::default().bandwidth_kbps(),
            Err(TsumugiError::NoBandwidthInfo)
        ));
    }

    #[test]
    fn test_media_type_candidate_order() {
        let adaptation = AdaptationSet {
            mime_type: Some("video/mp4".to_string()),
            content_type: Some("audio".to_string()),
            ..Default::default()
        };
        assert_eq!(adaptation.media_type().unwrap(), MediaType::Video);

        let adaptation = AdaptationSet {
            content_type: Some("audio".to_string()),
            ..Default::default()
        };
        assert_eq!(adaptation.media_type().unwrap(), MediaType::Audio);

        let adaptation = AdaptationSet {
            representations: vec![Representation {
                mime_type: Some("text/vtt".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        };
        assert_eq!(adaptation.media_type().unwrap(), MediaType::Subtitle);

        assert!(matches!(
            AdaptationSet::default().media_type(),
            Err(TsumugiError::UnknownMediaType(None))
        ));

        // The first candidate present decides, even when it does not map.
        let adaptation = AdaptationSet {
            mime_type: Some("application/mp4".to_string()),
            content_type: Some("video".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            adaptation.media_type(),
            Err(TsumugiError::UnknownMediaType(Some(_)))
        ));
    }

    #[test]
    fn test_media_type_display_round_trip() {
        for media_type in [MediaType::Video, MediaType::Audio, MediaType::Subtitle] {
            assert_eq!(
                media_type.to_string().parse::<MediaType>().unwrap(),
                media_type
            );
        }
    }
}

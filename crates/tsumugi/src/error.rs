use thiserror::Error;

#[derive(Error, Debug)]
pub enum TsumugiError {
    #[error("HTTP error: {0}")]
    HttpError(reqwest::StatusCode),

    #[error("Unsupported URL scheme: {0}")]
    IncorrectUrlScheme(String),

    #[error("Content is neither an MPD document nor an HLS playlist")]
    UnsupportedFormat,

    #[error("HLS playlists are not supported yet")]
    HlsNotSupported,

    #[error("Invalid MPD document: {0}")]
    MpdParseError(#[from] quick_xml::DeError),

    #[error("Manifest type {0:?} is not static or dynamic")]
    InvalidManifestType(Option<String>),

    #[error("ContentProtection carries no known encryption info")]
    NoEncryptionInfo,

    #[error("No pssh found in Widevine ContentProtection")]
    MissingWidevinePssh,

    #[error("No pssh or pro found in PlayReady ContentProtection")]
    MissingPlayReadyFields,

    #[error("Unrecognized protection scheme: {0}")]
    UnrecognizedProtectionScheme(String),

    #[error("No resolution info available")]
    NoResolutionInfo,

    #[error("No language info available")]
    NoLanguageInfo,

    #[error("No codec info available")]
    NoCodecInfo,

    #[error("No audio channel info available")]
    NoChannelInfo,

    #[error("Invalid audio channel value: {0}")]
    InvalidChannelValue(String),

    #[error("No bandwidth info available")]
    NoBandwidthInfo,

    #[error("Could not determine media type from {0:?}")]
    UnknownMediaType(Option<String>),

    #[error(transparent)]
    UrlParseError(#[from] url::ParseError),

    #[error(transparent)]
    RequestError(#[from] reqwest::Error),
}

pub type TsumugiResult<T> = Result<T, TsumugiError>;

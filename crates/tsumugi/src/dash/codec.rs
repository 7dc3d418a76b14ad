/// Map a raw `codecs` string to a human readable codec name.
///
/// Unknown codec strings pass through lowercased.
pub fn codec_repr(codec: &str) -> String {
    let codec = codec.to_lowercase();
    match codec.as_str() {
        c if c.starts_with("avc1") => "H.264".to_string(),
        c if c.starts_with("hvc1") => "H.265".to_string(),
        c if c.starts_with("hev1") => "HEVC".to_string(),
        c if c.starts_with("av01") => "AV1".to_string(),
        c if c.starts_with("vp09") => "VP9".to_string(),
        "mp4a.40.2" => "AAC-LC".to_string(),
        "mp4a.40.5" => "HE-AAC (v1)".to_string(),
        "mp4a.40.29" => "HE-AAC v2".to_string(),
        "ac-3" => "Dolby AC-3".to_string(),
        "ec-3" => "Dolby E-AC-3 (Atmos)".to_string(),
        _ => codec,
    }
}

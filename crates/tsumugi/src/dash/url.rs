use super::model::Mpd;

pub(crate) fn is_absolute_url(s: &str) -> bool {
    s.contains("://")
}

/// Collapse a BaseURL inheritance chain, ancestors first, into one location.
///
/// An absolute fragment replaces everything collected so far; a relative one
/// is appended with a single slash. Empty fragments are skipped.
pub fn resolve_url<'a>(fragments: impl IntoIterator<Item = &'a str>) -> String {
    let mut resolved = String::new();
    for fragment in fragments {
        if fragment.is_empty() {
            continue;
        }
        if is_absolute_url(fragment) {
            resolved = fragment.to_string();
        } else {
            resolved = format!("{}/{fragment}", resolved.trim_end_matches('/'));
        }
    }
    resolved
}

/// Cut a URL down to its last path separator, keeping the separator.
///
/// Used to derive a directory base from a manifest's own fetch location.
/// Returns the input unchanged if it contains no separator.
pub fn strip_url_filename(url: &str) -> &str {
    match url.rfind('/') {
        Some(index) => &url[..=index],
        None => url,
    }
}

impl Mpd {
    /// The one mutation pass over a decoded tree: compute an absolute
    /// [`Representation::resolved_url`](super::Representation::resolved_url)
    /// for every Representation by collapsing the BaseURL declarations on the
    /// path from the MPD root down to it. `manifest_url` is the leftmost
    /// fragment, so it wins exactly when no level declares any BaseURL.
    pub fn resolve_urls(&mut self, manifest_url: &str) {
        let mpd_base = self.base_url.clone();
        for period in &mut self.periods {
            let period_base = period.base_url.clone();
            for adaptation in &mut period.adaptation_sets {
                let adaptation_base = adaptation.base_url.clone();
                for representation in &mut adaptation.representations {
                    let fragments = [
                        Some(manifest_url),
                        mpd_base.as_deref(),
                        period_base.as_deref(),
                        adaptation_base.as_deref(),
                        representation.base_url.as_deref(),
                    ];
                    representation.resolved_url =
                        Some(resolve_url(fragments.into_iter().flatten()));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dash::model::{AdaptationSet, Period, Representation};

    #[test]
    fn test_resolve_url_appends_relative_fragments() {
        assert_eq!(
            resolve_url(["http://a.com/x", "y"]),
            "http://a.com/x/y".to_string()
        );
        assert_eq!(
            resolve_url(["http://a.com/x/", "y/", "z.mp4"]),
            "http://a.com/x/y/z.mp4".to_string()
        );
    }

    #[test]
    fn test_resolve_url_later_absolute_wins() {
        assert_eq!(
            resolve_url(["http://a.com/x/", "y/", "http://b.com/z"]),
            "http://b.com/z".to_string()
        );
    }

    #[test]
    fn test_resolve_url_skips_empty_fragments() {
        assert_eq!(
            resolve_url(["http://a.com/x", "", "y"]),
            "http://a.com/x/y".to_string()
        );

        let no_fragments: [&str; 0] = [];
        assert_eq!(resolve_url(no_fragments), "".to_string());
    }

    #[test]
    fn test_strip_url_filename() {
        assert_eq!(
            strip_url_filename("http://a.com/x/manifest.mpd"),
            "http://a.com/x/"
        );
        assert_eq!(strip_url_filename("no-separator"), "no-separator");
    }

    #[test]
    fn test_resolve_urls_walks_the_tree() {
        let mut mpd = Mpd {
            base_url: Some("media/".to_string()),
            periods: vec![Period {
                adaptation_sets: vec![AdaptationSet {
                    base_url: Some("video/".to_string()),
                    representations: vec![
                        Representation {
                            base_url: Some("1080p".to_string()),
                            ..Default::default()
                        },
                        Representation::default(),
                    ],
                    ..Default::default()
                }],
                ..Default::default()
            }],
            ..Default::default()
        };

        mpd.resolve_urls("https://cdn.example.com/stream/manifest.mpd");

        let representations = &mpd.periods[0].adaptation_sets[0].representations;
        assert_eq!(
            representations[0].resolved_url.as_deref(),
            Some("https://cdn.example.com/stream/manifest.mpd/media/video/1080p")
        );
        assert_eq!(
            representations[1].resolved_url.as_deref(),
            Some("https://cdn.example.com/stream/manifest.mpd/media/video/")
        );
    }

    #[test]
    fn test_resolve_urls_without_any_base_url() {
        let mut mpd = Mpd {
            periods: vec![Period {
                adaptation_sets: vec![AdaptationSet {
                    representations: vec![Representation::default()],
                    ..Default::default()
                }],
                ..Default::default()
            }],
            ..Default::default()
        };

        mpd.resolve_urls("https://cdn.example.com/stream/manifest.mpd");

        assert_eq!(
            mpd.periods[0].adaptation_sets[0].representations[0]
                .resolved_url
                .as_deref(),
            Some("https://cdn.example.com/stream/manifest.mpd")
        );
    }

    #[test]
    fn test_resolve_urls_absolute_base_overrides_manifest_url() {
        let mut mpd = Mpd {
            base_url: Some("https://edge.example.com/stream/".to_string()),
            periods: vec![Period {
                adaptation_sets: vec![AdaptationSet {
                    representations: vec![Representation {
                        base_url: Some("audio/main".to_string()),
                        ..Default::default()
                    }],
                    ..Default::default()
                }],
                ..Default::default()
            }],
            ..Default::default()
        };

        mpd.resolve_urls("https://cdn.example.com/stream/manifest.mpd");

        assert_eq!(
            mpd.periods[0].adaptation_sets[0].representations[0]
                .resolved_url
                .as_deref(),
            Some("https://edge.example.com/stream/audio/main")
        );
    }
}

use std::{path::PathBuf, str::FromStr};

use anyhow::{bail, Context};
use clap::Parser;
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue},
    Client, ClientBuilder,
};
use serde::Serialize;
use tsumugi::dash::{AdaptationSet, Mpd, Representation};

#[derive(Parser, Debug, Clone)]
struct KasuriArgs {
    /// Debug output
    #[clap(long, alias = "debug")]
    verbose: bool,

    /// Read the manifest from a local file instead of fetching it
    #[clap(short, long)]
    input: Option<PathBuf>,

    /// Base location used to resolve segment URLs when reading from a file
    #[clap(long)]
    base_url: Option<String>,

    /// HTTP Header used to fetch the manifest
    ///
    /// Custom header. eg. "Referer: https://example.com/"
    #[clap(short = 'H', long)]
    headers: Vec<String>,

    /// Print the summary as JSON
    #[clap(long)]
    json: bool,

    /// Manifest URL
    url: Option<String>,
}

impl KasuriArgs {
    fn client(&self) -> anyhow::Result<Client> {
        let mut headers = HeaderMap::new();
        for header in &self.headers {
            let (key, value) = header
                .split_once(':')
                .with_context(|| format!("Invalid header: {header}"))?;
            headers.insert(
                HeaderName::from_str(key.trim())?,
                HeaderValue::from_str(value.trim())?,
            );
        }

        Ok(ClientBuilder::new().default_headers(headers).build()?)
    }
}

#[derive(Serialize)]
struct ManifestSummary {
    live: Option<bool>,
    duration: Option<String>,
    publish_time: Option<String>,
    tracks: Vec<TrackSummary>,
}

#[derive(Serialize)]
struct TrackSummary {
    period: Option<String>,
    media_type: Option<String>,
    codec: Option<String>,
    language: Option<String>,
    audio_channels: Option<u32>,
    encryption: Vec<String>,
    variants: Vec<VariantSummary>,
}

#[derive(Serialize)]
struct VariantSummary {
    id: Option<String>,
    resolution: Option<String>,
    frame_rate: Option<String>,
    bandwidth_kbps: Option<u64>,
    url: Option<String>,
}

impl ManifestSummary {
    fn from_mpd(mpd: &Mpd) -> Self {
        let tracks = mpd
            .periods
            .iter()
            .flat_map(|period| {
                period.adaptation_sets.iter().map(|adaptation| {
                    TrackSummary::from_adaptation(period.id.as_deref(), adaptation)
                })
            })
            .collect();

        Self {
            live: mpd.is_live().ok(),
            duration: mpd.media_presentation_duration.clone(),
            publish_time: mpd.publish_time.clone(),
            tracks,
        }
    }

    fn print(&self) {
        match self.live {
            Some(true) => println!("Manifest: live"),
            Some(false) => println!("Manifest: static"),
            None => println!("Manifest: unknown type"),
        }
        if let Some(duration) = &self.duration {
            println!("Duration: {duration}");
        }

        for (index, track) in self.tracks.iter().enumerate() {
            let media_type = track.media_type.as_deref().unwrap_or("unknown");
            let codec = track.codec.as_deref().unwrap_or("unknown codec");
            println!("Track #{index}: {media_type} / {codec}");

            if let Some(period) = &track.period {
                println!("  period: {period}");
            }
            if let Some(language) = &track.language {
                println!("  language: {language}");
            }
            if let Some(channels) = track.audio_channels {
                println!("  channels: {channels}");
            }
            if !track.encryption.is_empty() {
                println!("  encryption: {}", track.encryption.join(", "));
            }

            for variant in &track.variants {
                let mut parts = Vec::new();
                if let Some(resolution) = &variant.resolution {
                    parts.push(resolution.clone());
                }
                if let Some(frame_rate) = &variant.frame_rate {
                    parts.push(format!("{frame_rate} fps"));
                }
                if let Some(bandwidth) = variant.bandwidth_kbps {
                    parts.push(format!("{bandwidth} kbps"));
                }
                let id = variant.id.as_deref().unwrap_or("?");
                let url = variant.url.as_deref().unwrap_or("(unresolved)");
                println!("    [{id}] {} -> {url}", parts.join(", "));
            }
        }
    }
}

impl TrackSummary {
    fn from_adaptation(period: Option<&str>, adaptation: &AdaptationSet) -> Self {
        let encryption = match adaptation.encryptions() {
            Ok(encryptions) => encryptions
                .iter()
                .map(|encryption| encryption.system.to_string())
                .collect(),
            Err(error) => {
                // fail-fast collection; show the rest of the track anyway
                tracing::warn!("Skipping encryption info: {error}");
                Vec::new()
            }
        };

        Self {
            period: period.map(str::to_string),
            media_type: adaptation
                .media_type()
                .ok()
                .map(|media_type| media_type.to_string()),
            codec: adaptation.codec_any().ok(),
            language: adaptation.language().ok(),
            audio_channels: adaptation.audio_channels().ok(),
            encryption,
            variants: adaptation
                .representations
                .iter()
                .map(VariantSummary::from_representation)
                .collect(),
        }
    }
}

impl VariantSummary {
    fn from_representation(representation: &Representation) -> Self {
        Self {
            id: representation.id.clone(),
            resolution: representation.resolution().ok(),
            frame_rate: representation.frame_rate.clone(),
            bandwidth_kbps: representation.bandwidth_kbps().ok(),
            url: representation.resolved_url.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = KasuriArgs::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();

    let mpd = match (&args.input, &args.url) {
        (Some(input), _) => {
            let content = tokio::fs::read_to_string(input)
                .await
                .with_context(|| format!("Reading {}", input.display()))?;
            let mut mpd = tsumugi::load_from_text(&content)?;
            if let Some(base_url) = &args.base_url {
                mpd.resolve_urls(base_url);
            }
            mpd
        }
        (None, Some(url)) => {
            let client = args.client()?;
            tsumugi::load_from_url(&client, url).await?
        }
        (None, None) => bail!("Either a manifest URL or --input is required"),
    };

    let summary = ManifestSummary::from_mpd(&mpd);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        summary.print();
    }

    Ok(())
}

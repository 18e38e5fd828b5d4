//! Decorative sidebar animation (a Lottie JSON asset).
//!
//! The fetch is best-effort: any failure (network error, non-200 status,
//! unparseable body) is logged and degrades to "no animation". Nothing here may
//! abort the dashboard.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;

pub const DEFAULT_ANIMATION_URL: &str = "https://assets10.lottiefiles.com/packages/lf20_CXxysN.json";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Playback speed multiplier applied on top of the asset's own frame rate.
pub const PLAYBACK_SPEED: f64 = 1.5;

/// The subset of a Lottie document needed to play it back as a spinner.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnimationAsset {
    #[serde(rename = "nm", default)]
    pub name: Option<String>,
    /// Frames per second.
    #[serde(rename = "fr")]
    pub frame_rate: f64,
    /// First frame.
    #[serde(rename = "ip", default)]
    pub in_point: f64,
    /// Last frame (exclusive).
    #[serde(rename = "op")]
    pub out_point: f64,
    #[serde(rename = "w", default)]
    pub width: u32,
    #[serde(rename = "h", default)]
    pub height: u32,
}

impl AnimationAsset {
    /// Parse a Lottie document, rejecting ones that can't be played.
    pub fn from_json(body: &str) -> Option<Self> {
        let asset: AnimationAsset = serde_json::from_str(body).ok()?;
        asset.is_playable().then_some(asset)
    }

    fn is_playable(&self) -> bool {
        self.frame_rate.is_finite()
            && self.frame_rate > 0.0
            && self.in_point.is_finite()
            && self.out_point.is_finite()
            && self.out_point > self.in_point
    }

    pub fn frame_count(&self) -> usize {
        (self.out_point - self.in_point).ceil().max(1.0) as usize
    }

    /// Wall-clock time of one frame at `speed`.
    pub fn frame_interval(&self, speed: f64) -> Duration {
        let fps = (self.frame_rate * speed).max(1e-3);
        Duration::from_secs_f64(1.0 / fps)
    }

    /// Length of one loop at `speed`.
    pub fn loop_duration(&self, speed: f64) -> Duration {
        self.frame_interval(speed) * self.frame_count() as u32
    }
}

/// Fetch the animation, or `None` if anything goes wrong.
pub fn fetch_animation(url: &str, timeout: Duration) -> Option<AnimationAsset> {
    let client = match Client::builder().timeout(timeout).build() {
        Ok(client) => client,
        Err(err) => {
            tracing::warn!(%err, "animation disabled: failed to build HTTP client");
            return None;
        }
    };

    let response = match client.get(url).send() {
        Ok(response) => response,
        Err(err) => {
            tracing::warn!(%url, %err, "animation disabled: request failed");
            return None;
        }
    };

    if response.status() != StatusCode::OK {
        tracing::warn!(%url, status = %response.status(), "animation disabled: non-200 response");
        return None;
    }

    let body = match response.text() {
        Ok(body) => body,
        Err(err) => {
            tracing::warn!(%url, %err, "animation disabled: failed to read body");
            return None;
        }
    };

    let asset = AnimationAsset::from_json(&body);
    match &asset {
        Some(a) => tracing::info!(%url, name = ?a.name, frames = a.frame_count(), "animation loaded"),
        None => tracing::warn!(%url, "animation disabled: not a playable Lottie document"),
    }
    asset
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_lottie_document() {
        let body = r#"{"v":"5.5.7","fr":30,"ip":0,"op":90,"w":200,"h":200,"nm":"covid","layers":[]}"#;
        let asset = AnimationAsset::from_json(body).unwrap();
        assert_eq!(asset.name.as_deref(), Some("covid"));
        assert_eq!(asset.frame_count(), 90);
        assert_eq!(asset.frame_interval(1.0), Duration::from_secs_f64(1.0 / 30.0));
        assert!((asset.loop_duration(PLAYBACK_SPEED).as_secs_f64() - 2.0).abs() < 1e-3);
    }

    #[test]
    fn rejects_unplayable_documents() {
        assert!(AnimationAsset::from_json("not json").is_none());
        assert!(AnimationAsset::from_json(r#"{"fr":0,"ip":0,"op":10}"#).is_none());
        assert!(AnimationAsset::from_json(r#"{"fr":30,"ip":10,"op":10}"#).is_none());
    }

    #[test]
    fn unreachable_url_degrades_to_none() {
        // Port 9 (discard) on localhost is essentially never listening.
        let asset = fetch_animation("http://127.0.0.1:9/anim.json", Duration::from_millis(200));
        assert!(asset.is_none());
    }
}

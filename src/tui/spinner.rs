//! Header spinner driven by the fetched Lottie asset's timing.

use std::time::{Duration, Instant};

use crate::data::animation::{AnimationAsset, PLAYBACK_SPEED};

const GLYPHS: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct Spinner {
    interval: Duration,
    started: Instant,
}

impl Spinner {
    pub fn new(asset: &AnimationAsset) -> Self {
        Self {
            interval: asset.frame_interval(PLAYBACK_SPEED).max(Duration::from_millis(15)),
            started: Instant::now(),
        }
    }

    /// How often the header needs a redraw.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn glyph(&self) -> &'static str {
        self.glyph_at(self.started.elapsed())
    }

    fn glyph_at(&self, elapsed: Duration) -> &'static str {
        let frame = elapsed.as_nanos() / self.interval.as_nanos().max(1);
        GLYPHS[(frame % GLYPHS.len() as u128) as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyph_advances_with_asset_frame_rate() {
        let asset = AnimationAsset::from_json(r#"{"fr":20,"ip":0,"op":40}"#).unwrap();
        let spinner = Spinner::new(&asset);
        // 20 fps at 1.5x -> one frame every 33.3ms.
        assert_eq!(spinner.glyph_at(Duration::ZERO), GLYPHS[0]);
        assert_eq!(spinner.glyph_at(Duration::from_millis(40)), GLYPHS[1]);
        assert_eq!(spinner.glyph_at(Duration::from_millis(340)), GLYPHS[0]);
    }
}

use serde::{Deserialize, Serialize};

use super::domain::ColorFamily;
use super::signals::{confident_label, ColorLabel, SignalMap};

const NEUTRAL_GREY: [u8; 3] = [128, 128, 128];

/// Dominant color of a foreground-isolated garment image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSample {
    pub primary_rgb: [u8; 3],
    pub color_family: ColorFamily,
}

impl Default for ColorSample {
    fn default() -> Self {
        Self {
            primary_rgb: NEUTRAL_GREY,
            color_family: ColorFamily::Neutral,
        }
    }
}

impl ColorSample {
    pub fn from_rgb(rgb: [u8; 3]) -> Self {
        Self {
            primary_rgb: rgb,
            color_family: ColorFamily::from_rgb(rgb),
        }
    }

    /// Fallback when no extractor ran: the winning color label above 0.20, else neutral grey.
    pub fn from_signals(color_scores: &SignalMap) -> Self {
        let color_family = confident_label::<ColorLabel>(color_scores, 0.20)
            .flatten()
            .map(ColorLabel::family)
            .unwrap_or(ColorFamily::Neutral);
        Self {
            primary_rgb: NEUTRAL_GREY,
            color_family,
        }
    }
}

/// 8-bit HSV with hue halved into `0..=180`.
fn rgb_to_hsv8([r, g, b]: [u8; 3]) -> (f64, f64, f64) {
    let (r, g, b) = (f64::from(r), f64::from(g), f64::from(b));
    let value = r.max(g).max(b);
    let delta = value - r.min(g).min(b);

    let saturation = if value > 0.0 {
        (delta / value * 255.0).round()
    } else {
        0.0
    };

    let hue = if delta == 0.0 {
        0.0
    } else {
        let degrees = if value == r {
            60.0 * (g - b) / delta
        } else if value == g {
            120.0 + 60.0 * (b - r) / delta
        } else {
            240.0 + 60.0 * (r - g) / delta
        };
        let degrees = if degrees < 0.0 { degrees + 360.0 } else { degrees };
        (degrees / 2.0).round()
    };

    (hue, saturation, value)
}

impl ColorFamily {
    /// Coarse family for a dominant RGB color.
    pub fn from_rgb(rgb: [u8; 3]) -> Self {
        let (hue, saturation, value) = rgb_to_hsv8(rgb);

        if saturation < 25.0 {
            return if value < 60.0 {
                ColorFamily::Dark
            } else {
                ColorFamily::Neutral
            };
        }
        if saturation < 80.0 && (hue < 40.0 || hue > 150.0) {
            return ColorFamily::Earth;
        }
        if value < 90.0 {
            return ColorFamily::Dark;
        }
        if value > 180.0 && saturation < 100.0 {
            return ColorFamily::Light;
        }
        if saturation > 100.0 {
            return ColorFamily::Bright;
        }
        ColorFamily::Neutral
    }
}

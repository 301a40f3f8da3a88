//! Cosmetic color adjustment for tiles and background
//!
//! Every knob lives in `[0, 1]` with 0.5 as the neutral setting. The
//! adjustments only ever touch the colors the view draws with; the engine
//! never sees them.
//!
//! Tile colors go through: brightness shift, HSV saturation and hue shift,
//! then contrast around mid-grey. The background only takes the background
//! brightness shift. Transparency darkens the backing behind each tile.

use crate::fb::Rgb;
use crate::types::{Symbol, SYMBOL_COUNT};

/// Base colors, one per symbol.
pub const SYMBOL_COLORS: [Rgb; SYMBOL_COUNT as usize] = [
    Rgb::new(230, 60, 60),
    Rgb::new(60, 200, 90),
    Rgb::new(70, 120, 235),
    Rgb::new(240, 210, 60),
    Rgb::new(190, 90, 220),
    Rgb::new(60, 210, 215),
    Rgb::new(245, 150, 40),
    Rgb::new(225, 225, 225),
];

/// Glyphs drawn on the tiles so symbols stay distinguishable without color.
pub const SYMBOL_GLYPHS: [char; SYMBOL_COUNT as usize] = ['@', '#', '%', '&', '*', '+', '=', '$'];

pub const BACKGROUND: Rgb = Rgb::new(30, 30, 40);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdjustKnob {
    Saturation,
    Brightness,
    Contrast,
    Hue,
    BackgroundBrightness,
    Transparency,
}

impl AdjustKnob {
    pub const ALL: [AdjustKnob; 6] = [
        AdjustKnob::Saturation,
        AdjustKnob::Brightness,
        AdjustKnob::Contrast,
        AdjustKnob::Hue,
        AdjustKnob::BackgroundBrightness,
        AdjustKnob::Transparency,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AdjustKnob::Saturation => "Saturation",
            AdjustKnob::Brightness => "Brightness",
            AdjustKnob::Contrast => "Contrast",
            AdjustKnob::Hue => "Color Tone",
            AdjustKnob::BackgroundBrightness => "BG Brightness",
            AdjustKnob::Transparency => "Transparency",
        }
    }

    /// Next knob, wrapping (`forward = false` goes back)
    pub fn cycle(self, forward: bool) -> Self {
        let i = Self::ALL.iter().position(|&k| k == self).unwrap_or(0);
        let n = Self::ALL.len();
        let j = if forward { (i + 1) % n } else { (i + n - 1) % n };
        Self::ALL[j]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorAdjust {
    pub saturation: f32,
    pub brightness: f32,
    pub contrast: f32,
    pub hue: f32,
    pub background_brightness: f32,
    pub transparency: f32,
}

impl Default for ColorAdjust {
    fn default() -> Self {
        Self {
            saturation: 0.5,
            brightness: 0.5,
            contrast: 0.5,
            hue: 0.5,
            background_brightness: 0.5,
            transparency: 0.5,
        }
    }
}

impl ColorAdjust {
    pub fn get(&self, knob: AdjustKnob) -> f32 {
        match knob {
            AdjustKnob::Saturation => self.saturation,
            AdjustKnob::Brightness => self.brightness,
            AdjustKnob::Contrast => self.contrast,
            AdjustKnob::Hue => self.hue,
            AdjustKnob::BackgroundBrightness => self.background_brightness,
            AdjustKnob::Transparency => self.transparency,
        }
    }

    /// Set a knob, clamped to `[0, 1]`
    pub fn set(&mut self, knob: AdjustKnob, value: f32) {
        let v = value.clamp(0.0, 1.0);
        match knob {
            AdjustKnob::Saturation => self.saturation = v,
            AdjustKnob::Brightness => self.brightness = v,
            AdjustKnob::Contrast => self.contrast = v,
            AdjustKnob::Hue => self.hue = v,
            AdjustKnob::BackgroundBrightness => self.background_brightness = v,
            AdjustKnob::Transparency => self.transparency = v,
        }
    }

    pub fn nudge(&mut self, knob: AdjustKnob, delta: f32) {
        self.set(knob, self.get(knob) + delta);
    }

    /// Adjusted tile color
    pub fn apply(&self, rgb: Rgb) -> Rgb {
        let shift = (self.brightness - 0.5) * 2.0;
        let [r, g, b] = to_unit(rgb).map(|c| (c + shift).clamp(0.0, 1.0));

        let (mut h, mut s, v) = rgb_to_hsv(r, g, b);
        s = (s + (self.saturation - 0.5) * 2.0).clamp(0.0, 1.0);
        h = (h + (self.hue - 0.5) * 2.0).rem_euclid(1.0);
        let (r, g, b) = hsv_to_rgb(h, s, v);

        let factor = (self.contrast - 0.5) * 2.0 + 1.0;
        from_unit([r, g, b].map(|c| ((c - 0.5) * factor + 0.5).clamp(0.0, 1.0)))
    }

    pub fn symbol_color(&self, symbol: Symbol) -> Rgb {
        self.apply(SYMBOL_COLORS[symbol.index() as usize])
    }

    /// Adjusted board background
    pub fn background(&self, rgb: Rgb) -> Rgb {
        let shift = (self.background_brightness - 0.5) * 2.0;
        from_unit(to_unit(rgb).map(|c| (c + shift).clamp(0.0, 1.0)))
    }

    /// Backing drawn under a tile: the background darkened by `transparency`
    pub fn tile_backing(&self, background: Rgb) -> Rgb {
        background.lerp(Rgb::new(0, 0, 0), self.transparency)
    }
}

fn to_unit(rgb: Rgb) -> [f32; 3] {
    [rgb.r, rgb.g, rgb.b].map(|c| c as f32 / 255.0)
}

fn from_unit(c: [f32; 3]) -> Rgb {
    let [r, g, b] = c.map(|v| (v * 255.0).round().clamp(0.0, 255.0) as u8);
    Rgb::new(r, g, b)
}

fn rgb_to_hsv(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let v = max;
    if max == min {
        return (0.0, 0.0, v);
    }
    let range = max - min;
    let s = range / max;
    let rc = (max - r) / range;
    let gc = (max - g) / range;
    let bc = (max - b) / range;
    let h = if r == max {
        bc - gc
    } else if g == max {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };
    ((h / 6.0).rem_euclid(1.0), s, v)
}

fn hsv_to_rgb(h: f32, s: f32, v: f32) -> (f32, f32, f32) {
    if s == 0.0 {
        return (v, v, v);
    }
    let i = (h * 6.0).floor();
    let f = h * 6.0 - i;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match (i as i32).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_settings_keep_colors() {
        let adjust = ColorAdjust::default();
        for c in SYMBOL_COLORS {
            assert_eq!(adjust.apply(c), c);
        }
        assert_eq!(adjust.background(BACKGROUND), BACKGROUND);
    }

    #[test]
    fn full_hue_turn_is_identity() {
        let mut adjust = ColorAdjust::default();
        adjust.set(AdjustKnob::Hue, 1.0);
        assert_eq!(adjust.apply(SYMBOL_COLORS[2]), SYMBOL_COLORS[2]);
    }

    #[test]
    fn extremes_saturate() {
        let mut adjust = ColorAdjust::default();
        adjust.set(AdjustKnob::Brightness, 1.0);
        assert_eq!(adjust.apply(SYMBOL_COLORS[0]), Rgb::new(255, 255, 255));

        let mut flat = ColorAdjust::default();
        flat.set(AdjustKnob::Contrast, 0.0);
        assert_eq!(flat.apply(SYMBOL_COLORS[3]), Rgb::new(128, 128, 128));

        let mut grey = ColorAdjust::default();
        grey.set(AdjustKnob::Saturation, 0.0);
        let g = grey.apply(Rgb::new(200, 40, 40));
        assert_eq!((g.r, g.g), (g.g, g.b));
    }

    #[test]
    fn knobs_clamp_and_cycle() {
        let mut adjust = ColorAdjust::default();
        adjust.nudge(AdjustKnob::Transparency, 2.0);
        assert_eq!(adjust.transparency, 1.0);
        assert_eq!(adjust.tile_backing(BACKGROUND), Rgb::new(0, 0, 0));

        assert_eq!(AdjustKnob::Transparency.cycle(true), AdjustKnob::Saturation);
        assert_eq!(AdjustKnob::Saturation.cycle(false), AdjustKnob::Transparency);
    }
}

//! Colormap definitions and application logic.

use std::str::FromStr;

use phenopix_core::Error;

/// Convert f32 to u8 with clamping.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn f32_to_u8(value: f32) -> u8 {
    value.clamp(0.0, 255.0) as u8
}

/// Available colormaps for pseudocolor rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Colormap {
    /// Viridis - perceptually uniform, purple to yellow.
    #[default]
    Viridis,
    /// Inferno - perceptually uniform, black to yellow through red.
    Inferno,
    /// Plasma - perceptually uniform, purple to yellow through magenta.
    Plasma,
    /// Jet - classic blue to red rainbow.
    Jet,
    /// Hot (Thermal) - black to red to yellow to white.
    Hot,
    /// Grayscale - black to white.
    Gray,
    /// Green - black to bright green.
    Green,
}

/// Anchor points (t, r, g, b) with channels in [0, 1], sampled from the
/// matplotlib originals for the perceptual maps.
const VIRIDIS_ANCHORS: [(f32, f32, f32, f32); 5] = [
    (0.00, 0.267, 0.004, 0.329),
    (0.25, 0.282, 0.141, 0.458),
    (0.50, 0.127, 0.567, 0.551),
    (0.75, 0.454, 0.820, 0.322),
    (1.00, 0.993, 0.906, 0.144),
];

const INFERNO_ANCHORS: [(f32, f32, f32, f32); 5] = [
    (0.00, 0.001, 0.000, 0.014),
    (0.25, 0.342, 0.062, 0.429),
    (0.50, 0.735, 0.215, 0.330),
    (0.75, 0.978, 0.557, 0.034),
    (1.00, 0.988, 1.000, 0.645),
];

const PLASMA_ANCHORS: [(f32, f32, f32, f32); 5] = [
    (0.00, 0.050, 0.030, 0.528),
    (0.25, 0.494, 0.012, 0.658),
    (0.50, 0.798, 0.280, 0.470),
    (0.75, 0.973, 0.586, 0.252),
    (1.00, 0.940, 0.975, 0.131),
];

const JET_ANCHORS: [(f32, f32, f32, f32); 5] = [
    (0.000, 0.0, 0.0, 0.5),
    (0.125, 0.0, 0.0, 1.0),
    (0.375, 0.0, 1.0, 1.0),
    (0.625, 1.0, 1.0, 0.0),
    (1.000, 0.5, 0.0, 0.0),
];

impl std::fmt::Display for Colormap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Colormap::Viridis => write!(f, "viridis"),
            Colormap::Inferno => write!(f, "inferno"),
            Colormap::Plasma => write!(f, "plasma"),
            Colormap::Jet => write!(f, "jet"),
            Colormap::Hot => write!(f, "hot"),
            Colormap::Gray => write!(f, "gray"),
            Colormap::Green => write!(f, "green"),
        }
    }
}

impl FromStr for Colormap {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "viridis" => Ok(Colormap::Viridis),
            "inferno" => Ok(Colormap::Inferno),
            "plasma" => Ok(Colormap::Plasma),
            "jet" => Ok(Colormap::Jet),
            "hot" => Ok(Colormap::Hot),
            "gray" | "grey" => Ok(Colormap::Gray),
            "green" => Ok(Colormap::Green),
            other => Err(Error::ConfigError(format!("unknown colormap '{other}'"))),
        }
    }
}

impl Colormap {
    /// Apply the colormap to a normalized value [0, 1] and return RGBA bytes.
    ///
    /// Values outside the range are clamped.
    #[must_use]
    pub fn apply(self, val: f32) -> [u8; 4] {
        let val = if val.is_finite() {
            val.clamp(0.0, 1.0)
        } else {
            0.0
        };
        match self {
            Colormap::Viridis => interpolate_anchors(&VIRIDIS_ANCHORS, val),
            Colormap::Inferno => interpolate_anchors(&INFERNO_ANCHORS, val),
            Colormap::Plasma => interpolate_anchors(&PLASMA_ANCHORS, val),
            Colormap::Jet => interpolate_anchors(&JET_ANCHORS, val),
            Colormap::Hot => {
                if val < 0.5 {
                    // Red to Yellow
                    let g = f32_to_u8(val * 2.0 * 255.0);
                    [255, g, 0, 255]
                } else {
                    // Yellow to White
                    let b = f32_to_u8((val - 0.5) * 2.0 * 255.0);
                    [255, 255, b, 255]
                }
            }
            Colormap::Gray => {
                let v = f32_to_u8(val * 255.0);
                [v, v, v, 255]
            }
            Colormap::Green => {
                let v = f32_to_u8(val * 255.0);
                [0, v, 0, 255]
            }
        }
    }
}

/// Piecewise-linear interpolation through anchor colors.
fn interpolate_anchors(anchors: &[(f32, f32, f32, f32)], t: f32) -> [u8; 4] {
    let (_, r0, g0, b0) = anchors[0];
    let mut prev = anchors[0];
    for &anchor in &anchors[1..] {
        let (t1, r1, g1, b1) = anchor;
        if t <= t1 {
            let (t0, r0, g0, b0) = prev;
            let span = t1 - t0;
            let f = if span > 0.0 { (t - t0) / span } else { 0.0 };
            return [
                f32_to_u8((r0 + (r1 - r0) * f) * 255.0),
                f32_to_u8((g0 + (g1 - g0) * f) * 255.0),
                f32_to_u8((b0 + (b1 - b0) * f) * 255.0),
                255,
            ];
        }
        prev = anchor;
    }
    // t below the first anchor (possible only for t < 0, already clamped)
    [
        f32_to_u8(r0 * 255.0),
        f32_to_u8(g0 * 255.0),
        f32_to_u8(b0 * 255.0),
        255,
    ]
}

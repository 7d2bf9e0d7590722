use palette::Srgba;
use serde::Serialize;
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

/// Named color sets. Selected per widget instance.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[strum(to_string = "light", serialize = "white")]
    Light,
    #[default]
    #[strum(to_string = "dark", serialize = "black")]
    Dark,
}

pub const MASK_STOPS: usize = 9;

/// Crimson used for the top cursor and the progress highlight.
pub const ACCENT: u32 = 0xFFD3_3A2A;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeColors {
    pub background: Srgba<f64>,
    pub cursor: Srgba<f64>,
    pub text: Srgba<f64>,
    pub text_background: Srgba<f64>,
    pub tick: Srgba<f64>,
    pub mask: [Srgba<f64>; MASK_STOPS],
    pub edge_start: Srgba<f64>,
    pub edge_end: Srgba<f64>,
    pub accent: Srgba<f64>,
}

/// Converts a packed `0xAARRGGBB` color.
pub fn argb(packed: u32) -> Srgba<f64> {
    let channel = |shift: u32| f64::from((packed >> shift) & 0xFF) / 255.0;
    Srgba::new(channel(16), channel(8), channel(0), channel(24))
}

const MASK_ALPHAS: [u32; MASK_STOPS] = [0x7f, 0x75, 0x5a, 0x30, 0x00, 0x30, 0x5a, 0x75, 0x7f];

fn mask(rgb: u32) -> [Srgba<f64>; MASK_STOPS] {
    MASK_ALPHAS.map(|a| argb((a << 24) | rgb))
}

impl Theme {
    pub fn colors(self) -> ThemeColors {
        match self {
            Theme::Light => ThemeColors {
                background: argb(0xFFFF_FFFF),
                cursor: argb(0xB200_0000),
                text: argb(0xFF00_0000),
                text_background: argb(0xFFFF_FFFF),
                tick: argb(0xFF00_0000),
                mask: mask(0xFF_FFFF),
                edge_start: argb(0xEFFF_FFFF),
                edge_end: argb(0x00FF_FFFF),
                accent: argb(ACCENT),
            },
            Theme::Dark => ThemeColors {
                background: argb(0xFF00_0000),
                cursor: argb(0xB2FF_FFFF),
                text: argb(0xFFFF_FFFF),
                text_background: argb(0xFF00_0000),
                tick: argb(0xFFFF_FFFF),
                mask: mask(0x00_0000),
                edge_start: argb(0xEF00_0000),
                edge_end: argb(0x0000_0000),
                accent: argb(ACCENT),
            },
        }
    }
}

impl From<Theme> for ThemeColors {
    fn from(theme: Theme) -> Self {
        theme.colors()
    }
}

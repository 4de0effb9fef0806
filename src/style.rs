//! Style value tables shared by the generators.
//!
//! Select fields store the human label the form shows ("Semibold",
//! "Medium"); these enums map those labels onto CSS values. Unknown labels
//! fall back to the variant of the schema default.

use crate::state::format_number;

/// `16` -> `16px`
pub fn px(n: f64) -> String {
    format!("{}px", format_number(n))
}

/// Converts hex color + opacity to an `rgba()` string.
///
/// Accepts `#rrggbb` and `#rgb`; anything else is returned untouched when
/// the opacity is 1, otherwise composed onto black.
pub fn rgba_from_hex(hex: &str, opacity: f64) -> String {
    let digits = hex.trim_start_matches('#');
    let expanded: String = if digits.len() == 3 {
        digits.chars().flat_map(|c| [c, c]).collect()
    } else {
        digits.to_string()
    };
    if expanded.len() == 6 && expanded.bytes().all(|b| b.is_ascii_hexdigit()) {
        if let (Ok(r), Ok(g), Ok(b)) = (
            u8::from_str_radix(&expanded[0..2], 16),
            u8::from_str_radix(&expanded[2..4], 16),
            u8::from_str_radix(&expanded[4..6], 16),
        ) {
            return format!("rgba({}, {}, {}, {})", r, g, b, format_number(opacity));
        }
    }
    if opacity >= 1.0 {
        hex.to_string()
    } else {
        format!("rgba(0, 0, 0, {})", format_number(opacity))
    }
}

/// Escapes a string for use inside a quoted CSS value (e.g. font-family)
pub fn escape_css_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShadowPreset {
    None,
    Small,
    Medium,
    Large,
}

impl ShadowPreset {
    pub fn from_choice(choice: &str) -> Self {
        match choice {
            "Small" => ShadowPreset::Small,
            "Medium" => ShadowPreset::Medium,
            "Large" => ShadowPreset::Large,
            _ => ShadowPreset::None,
        }
    }

    pub fn css(self) -> Option<&'static str> {
        match self {
            ShadowPreset::None => None,
            ShadowPreset::Small => Some("0 1px 2px rgba(0, 0, 0, 0.08)"),
            ShadowPreset::Medium => Some("0 4px 12px rgba(0, 0, 0, 0.12)"),
            ShadowPreset::Large => Some("0 12px 32px rgba(0, 0, 0, 0.18)"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GradientPreset {
    None,
    Sunset,
    Ocean,
    Forest,
    Midnight,
}

impl GradientPreset {
    pub const CHOICES: &'static [&'static str] = &["None", "Sunset", "Ocean", "Forest", "Midnight"];

    pub fn from_choice(choice: &str) -> Self {
        match choice {
            "Sunset" => GradientPreset::Sunset,
            "Ocean" => GradientPreset::Ocean,
            "Forest" => GradientPreset::Forest,
            "Midnight" => GradientPreset::Midnight,
            _ => GradientPreset::None,
        }
    }

    pub fn css(self) -> Option<&'static str> {
        match self {
            GradientPreset::None => None,
            GradientPreset::Sunset => Some("linear-gradient(135deg, #f97316 0%, #db2777 100%)"),
            GradientPreset::Ocean => Some("linear-gradient(135deg, #0ea5e9 0%, #1e3a8a 100%)"),
            GradientPreset::Forest => Some("linear-gradient(135deg, #22c55e 0%, #065f46 100%)"),
            GradientPreset::Midnight => Some("linear-gradient(135deg, #1e293b 0%, #020617 100%)"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FontWeight {
    Light,
    Normal,
    Medium,
    Semibold,
    Bold,
}

impl FontWeight {
    pub const CHOICES: &'static [&'static str] = &["Light", "Normal", "Medium", "Semibold", "Bold"];

    pub fn from_choice(choice: &str) -> Self {
        match choice {
            "Light" => FontWeight::Light,
            "Medium" => FontWeight::Medium,
            "Semibold" => FontWeight::Semibold,
            "Bold" => FontWeight::Bold,
            _ => FontWeight::Normal,
        }
    }

    pub fn css(self) -> &'static str {
        match self {
            FontWeight::Light => "300",
            FontWeight::Normal => "400",
            FontWeight::Medium => "500",
            FontWeight::Semibold => "600",
            FontWeight::Bold => "700",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
    Justify,
}

impl TextAlign {
    pub const CHOICES: &'static [&'static str] = &["Left", "Center", "Right", "Justify"];

    pub fn from_choice(choice: &str) -> Self {
        match choice {
            "Center" => TextAlign::Center,
            "Right" => TextAlign::Right,
            "Justify" => TextAlign::Justify,
            _ => TextAlign::Left,
        }
    }

    pub fn css(self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
            TextAlign::Justify => "justify",
        }
    }

    /// Flexbox equivalent, for blocks that align a child rather than text.
    pub fn justify_css(self) -> &'static str {
        match self {
            TextAlign::Left | TextAlign::Justify => "flex-start",
            TextAlign::Center => "center",
            TextAlign::Right => "flex-end",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FontFamily {
    Sans,
    Serif,
    Monospace,
}

impl FontFamily {
    pub const CHOICES: &'static [&'static str] = &["Sans", "Serif", "Monospace"];

    pub fn from_choice(choice: &str) -> Self {
        match choice {
            "Serif" => FontFamily::Serif,
            "Monospace" => FontFamily::Monospace,
            _ => FontFamily::Sans,
        }
    }

    pub fn css(self) -> &'static str {
        match self {
            FontFamily::Sans => "system-ui, -apple-system, sans-serif",
            FontFamily::Serif => "Georgia, 'Times New Roman', serif",
            FontFamily::Monospace => "ui-monospace, Menlo, monospace",
        }
    }
}

/// Small/Medium/Large size tiers used by buttons, badges and inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SizeTier {
    Small,
    Medium,
    Large,
}

impl SizeTier {
    pub const CHOICES: &'static [&'static str] = &["Small", "Medium", "Large"];

    pub fn from_choice(choice: &str) -> Self {
        match choice {
            "Small" => SizeTier::Small,
            "Large" => SizeTier::Large,
            _ => SizeTier::Medium,
        }
    }

    /// `(vertical padding, horizontal padding, font size)` in px
    pub fn metrics(self) -> (f64, f64, f64) {
        match self {
            SizeTier::Small => (6.0, 12.0, 14.0),
            SizeTier::Medium => (10.0, 20.0, 16.0),
            SizeTier::Large => (14.0, 28.0, 18.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ObjectFit {
    Cover,
    Contain,
    Fill,
    None,
}

impl ObjectFit {
    pub const CHOICES: &'static [&'static str] = &["Cover", "Contain", "Fill", "None"];

    pub fn from_choice(choice: &str) -> Self {
        match choice {
            "Contain" => ObjectFit::Contain,
            "Fill" => ObjectFit::Fill,
            "None" => ObjectFit::None,
            _ => ObjectFit::Cover,
        }
    }

    pub fn css(self) -> &'static str {
        match self {
            ObjectFit::Cover => "cover",
            ObjectFit::Contain => "contain",
            ObjectFit::Fill => "fill",
            ObjectFit::None => "none",
        }
    }
}

/// Yes/No select fields.
pub fn is_yes(choice: &str) -> bool {
    choice == "Yes"
}

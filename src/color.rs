use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::model::label::StatusLabel;

// ---------------------------------------------------------------------------
// Result styling
// ---------------------------------------------------------------------------

/// How a prediction result is emphasised in the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultStyle {
    /// Red heading, used for Dropout.
    Alert,
    /// Green success box.
    Success,
    /// Neutral box for labels the app does not recognise.
    Warning,
}

impl ResultStyle {
    pub fn for_label(label: StatusLabel) -> Self {
        match label {
            StatusLabel::Dropout => ResultStyle::Alert,
            StatusLabel::Enrolled | StatusLabel::Graduate => ResultStyle::Success,
            StatusLabel::Unknown(_) => ResultStyle::Warning,
        }
    }

    pub fn text_color(self) -> Color32 {
        match self {
            ResultStyle::Alert => Color32::RED,
            ResultStyle::Success => Color32::from_rgb(0x0f, 0x7b, 0x3f),
            ResultStyle::Warning => Color32::from_rgb(0x92, 0x6c, 0x00),
        }
    }

    pub fn fill(self) -> Color32 {
        match self {
            ResultStyle::Alert => Color32::TRANSPARENT,
            ResultStyle::Success => Color32::from_rgb(0xd4, 0xed, 0xda),
            ResultStyle::Warning => Color32::from_rgb(0xff, 0xf3, 0xcd),
        }
    }
}

// ---------------------------------------------------------------------------
// Bar colours for the probability chart
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            // Start at blue so generated colours stay clear of red and green.
            let hue = 210.0 + (i as f32 / n as f32) * 120.0;
            let hsl = Hsl::new(hue, 0.55, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// One colour per class, in order. Known labels reuse their result colour.
pub fn class_colors(labels: &[StatusLabel]) -> Vec<Color32> {
    let unknown = labels.iter().filter(|l| l.is_unknown()).count();
    let mut generated = generate_palette(unknown).into_iter();
    labels
        .iter()
        .map(|label| match label {
            StatusLabel::Dropout => Color32::RED,
            StatusLabel::Enrolled => Color32::from_rgb(0xe0, 0xa1, 0x00),
            StatusLabel::Graduate => ResultStyle::Success.text_color(),
            StatusLabel::Unknown(_) => generated.next().unwrap_or(Color32::GRAY),
        })
        .collect()
}

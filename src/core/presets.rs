use crate::core::error::ScanError;
use crate::core::format::CardFormat;

/// Named card format shipped with the tool.
#[derive(Debug, Clone)]
pub struct FormatPreset {
    pub name: &'static str,
    pub description: &'static str,
    build: fn() -> CardFormat,
}

impl FormatPreset {
    /// Fresh copy of the preset's format, ready to be edited per card.
    pub fn format(&self) -> CardFormat {
        (self.build)()
    }
}

/// Registry of built-in presets recognised by the CLI.
pub struct PresetRegistry;

impl PresetRegistry {
    /// Name of the preset new cards start from.
    pub const DEFAULT: &'static str = "ibm-5081";

    pub fn list() -> Vec<&'static FormatPreset> {
        vec![&IBM_5081, &IBM_5081_LEGACY]
    }

    /// Resolve a preset by name (case-insensitive).
    pub fn get(name: &str) -> Result<&'static FormatPreset, ScanError> {
        Self::list()
            .into_iter()
            .find(|preset| preset.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| ScanError::UnknownPreset(name.to_string()))
    }

    pub fn default_format() -> CardFormat {
        IBM_5081.format()
    }
}

// Physical IBM 5081 card: 7 3/8 x 3 1/4 inches, 0.087in column pitch,
// 0.25in row pitch, row 12 centred 0.25in below the top edge.
fn ibm_5081() -> CardFormat {
    CardFormat {
        columns: 80,
        rows: 12,
        reference_width: 7.375,
        reference_height: 3.25,
        top_margin: 0.25,
        left_margin: 0.25,
        columns_spacing: 0.087,
        rows_spacing: 0.25,
        threshold: 0.2,
        sample_radius: None,
        reverse: None,
    }
}

// Both axes measured against the card width, as older parameter records do.
fn ibm_5081_legacy() -> CardFormat {
    CardFormat {
        columns: 80,
        rows: 12,
        reference_width: 7.375,
        reference_height: 7.375,
        top_margin: 0.56,
        left_margin: 0.25,
        columns_spacing: 0.088,
        rows_spacing: 0.56,
        threshold: 0.2,
        sample_radius: None,
        reverse: None,
    }
}

static IBM_5081: FormatPreset = FormatPreset {
    name: "ibm-5081",
    description: "IBM 5081 80-column card, separate width/height reference in inches.",
    build: ibm_5081,
};

static IBM_5081_LEGACY: FormatPreset = FormatPreset {
    name: "ibm-5081-legacy",
    description: "IBM 5081 80-column card, both axes in card-width units.",
    build: ibm_5081_legacy,
};

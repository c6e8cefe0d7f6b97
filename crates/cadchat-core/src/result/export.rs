//! Download formats.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use super::RenderMode;

/// Artifact formats the download collaborator can produce.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ExportFormat {
    Svg,
    Step,
    Stl,
    Obj,
    #[serde(rename = "3mf")]
    #[strum(serialize = "3mf")]
    ThreeMf,
}

const VECTOR_FORMATS: &[ExportFormat] = &[ExportFormat::Svg];
const SOLID_FORMATS: &[ExportFormat] = &[
    ExportFormat::Step,
    ExportFormat::Stl,
    ExportFormat::Obj,
    ExportFormat::ThreeMf,
];

impl ExportFormat {
    /// Formats offered for a render mode. 2D results export as vector only.
    pub fn for_mode(mode: RenderMode) -> &'static [ExportFormat] {
        match mode {
            RenderMode::TwoD => VECTOR_FORMATS,
            RenderMode::ThreeD => SOLID_FORMATS,
        }
    }

    /// File extension, also the `format` query value on the wire.
    pub fn extension(&self) -> &'static str {
        self.into()
    }

    /// Human-readable label for menus.
    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Svg => "SVG",
            ExportFormat::Step => "STEP",
            ExportFormat::Stl => "STL",
            ExportFormat::Obj => "OBJ",
            ExportFormat::ThreeMf => "3MF",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_two_d_exports_vector_only() {
        let formats = ExportFormat::for_mode(RenderMode::TwoD);
        assert_eq!(formats, &[ExportFormat::Svg]);
        assert!(!formats.contains(&ExportFormat::Stl));
    }

    #[test]
    fn test_three_d_exports_solid_formats() {
        let formats = ExportFormat::for_mode(RenderMode::ThreeD);
        assert!(formats.contains(&ExportFormat::Step));
        assert!(formats.contains(&ExportFormat::Stl));
        assert!(!formats.contains(&ExportFormat::Svg));
    }

    #[test]
    fn test_parse_and_extension() {
        assert_eq!(ExportFormat::from_str("STL").unwrap(), ExportFormat::Stl);
        assert_eq!(ExportFormat::from_str("3mf").unwrap(), ExportFormat::ThreeMf);
        assert_eq!(ExportFormat::ThreeMf.extension(), "3mf");
        assert_eq!(ExportFormat::Step.to_string(), "step");
        assert!(ExportFormat::from_str("vrml").is_err());
    }
}

//! Render-mode dispatcher.
//!
//! Pure selection over the current result: decides which presentation the
//! viewport shows and which download formats are offered.

use serde::Serialize;

use crate::error::{CadError, Result};
use crate::geometry::{NormalizedShapes, normalize_optional};
use crate::result::{CadResult, ExportFormat, RenderMode};

/// Note shown above a code listing when no vector preview exists.
pub const CODE_LISTING_NOTE: &str =
    "No SVG preview was produced for this result; showing the generated code instead.";

/// Auxiliary metadata surfaced next to a presentation.
///
/// Never changes which presentation is chosen.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Annotations {
    pub note: Option<String>,
    pub generator: Option<String>,
}

impl Annotations {
    fn of(result: &CadResult) -> Self {
        Self {
            note: result.note.clone(),
            generator: result.generator.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.note.is_none() && self.generator.is_none()
    }
}

/// What the viewport should display.
#[derive(Debug, Clone, PartialEq)]
pub enum Presentation {
    /// No result yet, or a 3D result with nothing drawable.
    Welcome,
    /// Hand these shapes to the scene builder.
    Scene {
        shapes: NormalizedShapes,
        annotations: Annotations,
    },
    /// Render the markup as a vector drawing.
    Vector {
        svg: String,
        annotations: Annotations,
    },
    /// Show the generated source read-only.
    CodeListing {
        code: String,
        note: &'static str,
        annotations: Annotations,
    },
    /// 2D result whose content has not arrived.
    Loading { annotations: Annotations },
}

impl Presentation {
    pub fn kind(&self) -> &'static str {
        match self {
            Presentation::Welcome => "welcome",
            Presentation::Scene { .. } => "scene",
            Presentation::Vector { .. } => "vector",
            Presentation::CodeListing { .. } => "code",
            Presentation::Loading { .. } => "loading",
        }
    }
}

/// Chooses the presentation for the current result.
pub fn dispatch(result: Option<&CadResult>) -> Presentation {
    let Some(result) = result else {
        return Presentation::Welcome;
    };
    let annotations = Annotations::of(result);

    match result.render_mode {
        RenderMode::TwoD => {
            if let Some(svg) = &result.svg {
                Presentation::Vector {
                    svg: svg.clone(),
                    annotations,
                }
            } else if let Some(code) = &result.code {
                Presentation::CodeListing {
                    code: code.clone(),
                    note: CODE_LISTING_NOTE,
                    annotations,
                }
            } else {
                Presentation::Loading { annotations }
            }
        }
        RenderMode::ThreeD => match normalize_optional(result.shapes.as_ref()) {
            Ok(normalized) => match normalized.renderable() {
                Some(shapes) => Presentation::Scene {
                    shapes: shapes.clone(),
                    annotations,
                },
                None => Presentation::Welcome,
            },
            Err(err) => {
                tracing::warn!(
                    "[Dispatcher] Result {} has unusable shapes: {}",
                    result.id,
                    err
                );
                Presentation::Welcome
            }
        },
    }
}

/// Download formats offered for a render mode.
pub fn download_options(mode: RenderMode) -> &'static [ExportFormat] {
    ExportFormat::for_mode(mode)
}

/// A download request that passed the mode/format check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub result_id: String,
    pub format: ExportFormat,
}

impl DownloadRequest {
    /// Suggested file name, `{id}.{ext}`.
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.result_id, self.format.extension())
    }
}

/// Validates a download against the current result before it reaches the
/// download collaborator.
///
/// # Errors
///
/// - `NoCurrentResult` when nothing is displayed
/// - `UnsupportedExportFormat` when `format` is not offered for the result's mode
pub fn authorize_download(
    result: Option<&CadResult>,
    format: ExportFormat,
) -> Result<DownloadRequest> {
    let result = result.ok_or(CadError::NoCurrentResult)?;

    if !download_options(result.render_mode).contains(&format) {
        return Err(CadError::UnsupportedExportFormat {
            format: format.to_string(),
            mode: result.render_mode.to_string(),
        });
    }

    Ok(DownloadRequest {
        result_id: result.id.clone(),
        format,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn two_d() -> CadResult {
        CadResult::new("o2", "c1", RenderMode::TwoD)
    }

    fn three_d(shapes: serde_json::Value) -> CadResult {
        CadResult::new("o3", "c1", RenderMode::ThreeD).with_shapes(shapes)
    }

    #[test]
    fn test_no_result_shows_welcome() {
        assert_eq!(dispatch(None), Presentation::Welcome);
    }

    #[test]
    fn test_two_d_prefers_svg_over_code() {
        let result = two_d().with_svg("<svg/>").with_code("d = Drawing()");
        assert!(matches!(dispatch(Some(&result)), Presentation::Vector { svg, .. } if svg == "<svg/>"));
    }

    #[test]
    fn test_two_d_falls_back_to_code_listing() {
        let result = two_d().with_code("d = Drawing()");
        match dispatch(Some(&result)) {
            Presentation::CodeListing { code, note, .. } => {
                assert_eq!(code, "d = Drawing()");
                assert_eq!(note, CODE_LISTING_NOTE);
            }
            other => panic!("unexpected presentation: {:?}", other),
        }
    }

    #[test]
    fn test_two_d_without_content_is_loading_even_with_shapes() {
        let mut result = two_d().with_note("queued").with_generator("schemdraw");
        result.shapes = Some(json!([{"parts": [{"id": "/a", "state": {}}]}, [{}]]));

        match dispatch(Some(&result)) {
            Presentation::Loading { annotations } => {
                assert_eq!(annotations.note.as_deref(), Some("queued"));
                assert_eq!(annotations.generator.as_deref(), Some("schemdraw"));
            }
            other => panic!("unexpected presentation: {:?}", other),
        }
    }

    #[test]
    fn test_three_d_with_shapes_goes_to_scene() {
        let result = three_d(json!([
            {"parts": [{"id": "/cyl", "state": {"selected": false}}]},
            [{"vertices": [0.0, 0.0, 0.0]}]
        ]));
        match dispatch(Some(&result)) {
            Presentation::Scene { shapes, .. } => assert_eq!(shapes.states.len(), 1),
            other => panic!("unexpected presentation: {:?}", other),
        }
    }

    #[test]
    fn test_three_d_without_drawable_shapes_shows_welcome() {
        assert_eq!(dispatch(Some(&three_d(json!([])))), Presentation::Welcome);
        assert_eq!(
            dispatch(Some(&three_d(json!([{"parts": []}, [{}]])))),
            Presentation::Welcome
        );
        assert_eq!(
            dispatch(Some(&three_d(json!([null, [{}]])))),
            Presentation::Welcome
        );
        let bare = CadResult::new("o", "c", RenderMode::ThreeD).with_svg("<svg/>");
        assert_eq!(dispatch(Some(&bare)), Presentation::Welcome);
    }

    #[test]
    fn test_forced_stl_download_for_two_d_is_rejected() {
        let result = two_d().with_svg("<svg/>");
        assert!(!download_options(RenderMode::TwoD).contains(&ExportFormat::Stl));

        let err = authorize_download(Some(&result), ExportFormat::Stl).unwrap_err();
        assert!(matches!(err, CadError::UnsupportedExportFormat { ref format, .. } if format == "stl"));

        let request = authorize_download(Some(&result), ExportFormat::Svg).unwrap();
        assert_eq!(request.file_name(), "o2.svg");
    }

    #[test]
    fn test_download_without_result_is_rejected() {
        assert_eq!(
            authorize_download(None, ExportFormat::Step).unwrap_err(),
            CadError::NoCurrentResult
        );
    }
}

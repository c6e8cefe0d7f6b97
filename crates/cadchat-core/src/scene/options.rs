//! Viewer and render configuration values.
//!
//! Both structs are immutable once handed to a [`super::SceneBuilder`]; two
//! viewports can run side by side with different values.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlKind {
    #[default]
    Trackball,
    Orbit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UpAxis {
    Y,
    #[default]
    Z,
}

/// Static viewport configuration applied once per mount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerOptions {
    pub theme: Theme,
    /// Orthographic projection instead of perspective
    pub ortho: bool,
    pub control: ControlKind,
    pub normal_len: f64,
    pub cad_width: u32,
    pub height: u32,
    /// Number of grid ticks
    pub ticks: u32,
    pub ambient_intensity: f64,
    pub direct_intensity: f64,
    pub transparent: bool,
    pub black_edges: bool,
    pub axes: bool,
    /// Grid visibility for the xy, xz and yz planes
    pub grid: [bool; 3],
    pub timeit: bool,
    pub rotate_speed: f64,
    pub tools: bool,
    pub glass: bool,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            ortho: true,
            control: ControlKind::Trackball,
            normal_len: 0.0,
            cad_width: 1280,
            height: 612,
            ticks: 10,
            ambient_intensity: 0.9,
            direct_intensity: 0.12,
            transparent: false,
            black_edges: false,
            axes: true,
            grid: [false, false, false],
            timeit: false,
            rotate_speed: 1.0,
            tools: false,
            glass: false,
        }
    }
}

/// Shading, lighting and material constants used for every render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub ambient_intensity: f64,
    pub direct_intensity: f64,
    pub metalness: f64,
    pub roughness: f64,
    /// Edge color as 0xRRGGBB
    pub edge_color: u32,
    pub default_opacity: f64,
    pub normal_len: f64,
    pub up: UpAxis,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            ambient_intensity: 1.0,
            direct_intensity: 1.1,
            metalness: 0.30,
            roughness: 0.65,
            edge_color: 0x707070,
            default_opacity: 0.5,
            normal_len: 0.0,
            up: UpAxis::Z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_option_defaults() {
        let options = RenderOptions::default();
        assert_eq!(options.edge_color, 0x707070);
        assert_eq!(options.up, UpAxis::Z);
        assert!((options.default_opacity - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_partial_viewer_options_keep_defaults() {
        let options: ViewerOptions = toml::from_str("theme = \"dark\"\nticks = 4").unwrap();
        assert_eq!(options.theme, Theme::Dark);
        assert_eq!(options.ticks, 4);
        assert!(options.ortho);
        assert_eq!(options.control, ControlKind::Trackball);
    }
}

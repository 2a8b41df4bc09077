use image::Rgb;

use crate::state::LightingState;

/// Default frame width and height in pixels.
pub const DEFAULT_RESOLUTION: u32 = 500;
/// Default sampling step for spheres and tori.
pub const DEFAULT_STEP: usize = 20;

/// Settings for one interpreter run and its software backend.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub width: u32,
    pub height: u32,
    /// Sphere/torus sampling resolution.
    pub step: usize,
    /// Color the frame is cleared to.
    pub background: Rgb<u8>,
    /// Flat color for LINE commands. Defaults to white, not the black the
    /// classic renderer used, so lines show on the default black background.
    pub line_color: Rgb<u8>,
    /// Lighting state at the start of the run.
    pub lighting: LightingState,
    /// Program to run with a PNG snapshot on DISPLAY. `None` only logs.
    pub display_command: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_RESOLUTION,
            height: DEFAULT_RESOLUTION,
            step: DEFAULT_STEP,
            background: Rgb([0, 0, 0]),
            line_color: Rgb([255, 255, 255]),
            lighting: LightingState::default(),
            display_command: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lines_contrast_with_background() {
        let config = EngineConfig::default();
        assert_eq!(config.background, Rgb([0, 0, 0]));
        assert_eq!(config.line_color, Rgb([255, 255, 255]));
        assert_eq!((config.width, config.height, config.step), (500, 500, 20));
    }
}

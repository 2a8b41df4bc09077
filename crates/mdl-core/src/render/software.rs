//! CPU render backend writing into an owned `FrameBuffer`.

use std::path::Path;
use std::process::Command;

use glam::DVec4;
use image::{ImageFormat, Rgb};

use super::frame::FrameBuffer;
use super::{raster, RenderBackend, Shading};
use crate::config::EngineConfig;
use crate::error::BackendError;

/// Reference backend: rasterizes on the CPU, saves through `image`, and
/// presents frames by handing a PNG to an external viewer.
#[derive(Clone, Debug)]
pub struct SoftwareBackend {
    frame: FrameBuffer,
    viewer: Option<String>,
    displays: usize,
}

impl SoftwareBackend {
    /// Create a backend with a cleared frame sized from `config`.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            frame: FrameBuffer::new(config.width, config.height, config.background),
            viewer: config.display_command.clone(),
            displays: 0,
        }
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn frame_mut(&mut self) -> &mut FrameBuffer {
        &mut self.frame
    }

    /// Number of DISPLAY requests served so far.
    pub fn display_count(&self) -> usize {
        self.displays
    }

    fn run_viewer(&self, program: &str) -> Result<(), BackendError> {
        let snapshot = tempfile::Builder::new()
            .prefix("mdl-display-")
            .suffix(".png")
            .tempfile()?;
        self.frame
            .image()
            .save_with_format(snapshot.path(), ImageFormat::Png)?;

        log::debug!("running viewer '{}' on {}", program, snapshot.path().display());
        let status = Command::new(program).arg(snapshot.path()).status()?;
        if !status.success() {
            return Err(BackendError::Viewer {
                program: program.to_string(),
                status,
            });
        }
        Ok(())
    }
}

impl RenderBackend for SoftwareBackend {
    fn draw_polygons(&mut self, polygons: &[DVec4], shading: &Shading) {
        raster::draw_polygons(&mut self.frame, polygons, shading);
    }

    fn draw_lines(&mut self, edges: &[DVec4], color: Rgb<u8>) {
        raster::draw_lines(&mut self.frame, edges, color);
    }

    fn display(&mut self) -> Result<(), BackendError> {
        self.displays += 1;
        match &self.viewer {
            Some(program) => self.run_viewer(program),
            None => {
                log::info!(
                    "display #{}: {}x{} frame (no viewer configured)",
                    self.displays,
                    self.frame.width(),
                    self.frame.height()
                );
                Ok(())
            }
        }
    }

    fn save(&mut self, path: &Path) -> Result<(), BackendError> {
        self.frame.save(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_frame_uses_config() {
        let config = EngineConfig {
            width: 32,
            height: 16,
            background: Rgb([1, 2, 3]),
            ..EngineConfig::default()
        };
        let backend = SoftwareBackend::new(&config);
        assert_eq!(backend.frame().width(), 32);
        assert_eq!(backend.frame().height(), 16);
        assert_eq!(backend.frame().pixel(0, 0), Some(Rgb([1, 2, 3])));
    }

    #[test]
    fn test_display_without_viewer_counts() {
        let mut backend = SoftwareBackend::new(&EngineConfig::default());
        backend.display().unwrap();
        backend.display().unwrap();
        assert_eq!(backend.display_count(), 2);
    }

    #[test]
    fn test_save_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        let mut backend = SoftwareBackend::new(&EngineConfig::default());
        backend.save(&path).unwrap();
        let loaded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(loaded.dimensions(), (500, 500));
    }

    #[test]
    fn test_save_unknown_extension_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut backend = SoftwareBackend::new(&EngineConfig::default());
        let err = backend.save(&dir.path().join("frame.nope")).unwrap_err();
        assert!(matches!(err, BackendError::Image(_)));
    }
}

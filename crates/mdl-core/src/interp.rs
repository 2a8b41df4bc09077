//! The interpreter loop: dispatches compiled commands in order against an
//! execution context and a render backend.
//!
//! Generic over `RenderBackend`, so the same loop drives the software
//! rasterizer or a recording backend in tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use image::Rgb;

use crate::config::EngineConfig;
use crate::error::{BufferKind, ExecError};
use crate::geometry::{shapes, EdgeBuffer, Overflow, PolygonBuffer};
use crate::math::{rotation, scale, translation};
use crate::ops::{Operation, SymbolTable};
use crate::origin::OriginStack;
use crate::render::{RenderBackend, Shading};
use crate::state::{LightingState, Reflectance};

/// Shared flag that stops a run between two commands.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Counters reported at the end of a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExecSummary {
    /// Commands dispatched, supported or not.
    pub executed: usize,
    /// BOX, SPHERE and TORUS commands drawn.
    pub solids: usize,
    /// LINE commands drawn.
    pub lines: usize,
    /// Commands skipped as not supported.
    pub unsupported: usize,
}

/// Mutable state owned by one run: coordinate systems, lighting, and the two
/// scratch buffers.
#[derive(Debug)]
pub struct ExecContext {
    pub origins: OriginStack,
    pub lighting: LightingState,
    polygons: Box<PolygonBuffer>,
    edges: Box<EdgeBuffer>,
}

impl ExecContext {
    pub fn new(lighting: LightingState) -> Self {
        Self {
            origins: OriginStack::new(),
            lighting,
            polygons: Box::default(),
            edges: Box::default(),
        }
    }

    pub fn polygons(&self) -> &PolygonBuffer {
        &self.polygons
    }

    pub fn edges(&self) -> &EdgeBuffer {
        &self.edges
    }

    /// Shading inputs for one primitive with already-resolved constants.
    fn shading(&self, reflect: Reflectance) -> Shading {
        Shading {
            view: self.lighting.view,
            light: self.lighting.light,
            ambient: self.lighting.ambient,
            reflect,
        }
    }
}

/// Executes command lists against a render backend.
pub struct Interpreter<B: RenderBackend> {
    ctx: ExecContext,
    backend: B,
    step: usize,
    line_color: Rgb<u8>,
    cancel: Option<CancelToken>,
}

impl<B: RenderBackend> Interpreter<B> {
    /// Create an interpreter with a fresh context from `config`.
    pub fn new(backend: B, config: &EngineConfig) -> Self {
        Self {
            ctx: ExecContext::new(config.lighting),
            backend,
            step: config.step,
            line_color: config.line_color,
            cancel: None,
        }
    }

    /// Check `token` before every command.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn context(&self) -> &ExecContext {
        &self.ctx
    }

    pub fn origins(&self) -> &OriginStack {
        &self.ctx.origins
    }

    pub fn lighting(&self) -> &LightingState {
        &self.ctx.lighting
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Run every command once, in order.
    ///
    /// Stops at the first failing command. The origin stack is left as it
    /// was before that command and both scratch buffers are empty.
    pub fn execute(
        &mut self,
        commands: &[Operation],
        symbols: &SymbolTable,
    ) -> Result<ExecSummary, ExecError> {
        log::info!("executing {} commands", commands.len());
        symbols.log_contents();

        let mut summary = ExecSummary::default();
        for (index, op) in commands.iter().enumerate() {
            if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
                log::warn!("cancelled before command {}", index);
                return Err(ExecError::Cancelled { index });
            }
            self.dispatch(index, op, symbols, &mut summary)?;
            summary.executed += 1;
        }

        log::info!(
            "done: {} commands, {} solids, {} lines, {} unsupported",
            summary.executed,
            summary.solids,
            summary.lines,
            summary.unsupported
        );
        Ok(summary)
    }

    fn dispatch(
        &mut self,
        index: usize,
        op: &Operation,
        symbols: &SymbolTable,
        summary: &mut ExecSummary,
    ) -> Result<(), ExecError> {
        log::debug!("{}: {}", index, op.opcode());

        match op {
            Operation::Push => self.ctx.origins.push(),
            Operation::Pop => {
                self.ctx
                    .origins
                    .pop()
                    .map_err(|_| ExecError::StackUnderflow { index })?;
            }
            Operation::Move { offset } => {
                self.ctx
                    .origins
                    .compose(&translation(offset.x, offset.y, offset.z));
            }
            Operation::Scale { factors } => {
                self.ctx
                    .origins
                    .compose(&scale(factors.x, factors.y, factors.z));
            }
            Operation::Rotate { axis, degrees } => {
                self.ctx
                    .origins
                    .compose(&rotation(*axis, degrees.to_radians()));
            }
            Operation::Box {
                corner,
                size,
                constants,
            } => {
                self.draw_solid(index, constants.as_deref(), symbols, |buf, _| {
                    shapes::add_box(buf, *corner, *size)
                })?;
                summary.solids += 1;
            }
            Operation::Sphere {
                center,
                radius,
                constants,
            } => {
                self.draw_solid(index, constants.as_deref(), symbols, |buf, step| {
                    shapes::add_sphere(buf, *center, *radius, step)
                })?;
                summary.solids += 1;
            }
            Operation::Torus {
                center,
                tube,
                ring,
                constants,
            } => {
                self.draw_solid(index, constants.as_deref(), symbols, |buf, step| {
                    shapes::add_torus(buf, *center, *tube, *ring, step)
                })?;
                summary.solids += 1;
            }
            Operation::Line { p0, p1 } => {
                self.draw_edges(index, |buf| shapes::add_edge(buf, *p0, *p1))?;
                summary.lines += 1;
            }
            Operation::Light { color } => self.ctx.lighting.set_light_color(*color),
            Operation::Ambient { color } => self.ctx.lighting.set_ambient(*color),
            Operation::Save { filename } => {
                self.backend
                    .save(filename)
                    .map_err(|source| ExecError::Backend { index, source })?;
                log::info!("saved frame to {}", filename.display());
            }
            Operation::Display => {
                self.backend
                    .display()
                    .map_err(|source| ExecError::Backend { index, source })?;
            }
            Operation::Camera { .. }
            | Operation::Mesh { .. }
            | Operation::Set { .. }
            | Operation::Basename { .. }
            | Operation::SaveKnobs { .. }
            | Operation::SetKnobs { .. }
            | Operation::Tween { .. }
            | Operation::Frames { .. }
            | Operation::Vary { .. }
            | Operation::Shading { .. }
            | Operation::GenerateRayfiles
            | Operation::Focal { .. }
            | Operation::SaveCoords { .. } => {
                log::debug!("{}: '{}' is not supported, skipping", index, op.opcode());
                summary.unsupported += 1;
            }
        }
        Ok(())
    }

    /// Generate a solid into the polygon buffer, move it into the current
    /// coordinate system, draw it, and empty the buffer.
    fn draw_solid<F>(
        &mut self,
        index: usize,
        material: Option<&str>,
        symbols: &SymbolTable,
        generate: F,
    ) -> Result<(), ExecError>
    where
        F: FnOnce(&mut PolygonBuffer, usize) -> Result<(), Overflow>,
    {
        let reflect = self.ctx.lighting.resolve(material, symbols);
        let shading = self.ctx.shading(reflect);
        let top = self.ctx.origins.top();

        let polygons: &mut PolygonBuffer = &mut self.ctx.polygons;
        if let Err(overflow) = generate(polygons, self.step) {
            polygons.clear();
            return Err(overflow_error(index, BufferKind::Polygon, overflow));
        }
        polygons.transform(&top);
        self.backend.draw_polygons(polygons.as_slice(), &shading);
        polygons.clear();
        Ok(())
    }

    /// Same lifecycle as `draw_solid` for the edge buffer.
    fn draw_edges<F>(&mut self, index: usize, generate: F) -> Result<(), ExecError>
    where
        F: FnOnce(&mut EdgeBuffer) -> Result<(), Overflow>,
    {
        let top = self.ctx.origins.top();

        let edges: &mut EdgeBuffer = &mut self.ctx.edges;
        if let Err(overflow) = generate(edges) {
            edges.clear();
            return Err(overflow_error(index, BufferKind::Edge, overflow));
        }
        edges.transform(&top);
        self.backend.draw_lines(edges.as_slice(), self.line_color);
        edges.clear();
        Ok(())
    }
}

fn overflow_error(index: usize, kind: BufferKind, overflow: Overflow) -> ExecError {
    ExecError::BufferOverflow {
        index,
        kind,
        required: overflow.required,
        capacity: overflow.capacity,
    }
}

/// Run `commands` on a fresh interpreter and hand back the backend.
pub fn execute<B: RenderBackend>(
    commands: &[Operation],
    symbols: &SymbolTable,
    backend: B,
    config: &EngineConfig,
) -> Result<(ExecSummary, B), ExecError> {
    let mut interp = Interpreter::new(backend, config);
    let summary = interp.execute(commands, symbols)?;
    Ok((summary, interp.into_backend()))
}

//! Interpreter for compiled MDL scene scripts.
//!
//! A script is an ordered list of [`ops::Operation`]s plus a
//! [`ops::SymbolTable`]. The [`interp::Interpreter`] runs it against a
//! [`render::RenderBackend`], keeping an origin stack of coordinate systems,
//! the lighting state, and two reusable geometry buffers.

pub mod config;
pub mod error;
pub mod geometry;
pub mod interp;
pub mod math;
pub mod ops;
pub mod origin;
pub mod render;
pub mod scene;
pub mod state;

pub use config::EngineConfig;
pub use error::{BackendError, BufferKind, ExecError};
pub use interp::{execute, CancelToken, ExecContext, ExecSummary, Interpreter};
pub use ops::{Opcode, Operation, SymbolTable};
pub use origin::{OriginStack, StackUnderflow};
pub use render::{FrameBuffer, RenderBackend, Shading, SoftwareBackend};
pub use scene::Script;
pub use state::{LightingState, PointLight, Reflectance};

//! Shader building.
//!
//! A [`ShaderSource`] record holds one vertex and one fragment stage as WGSL.
//! [`ShaderProgram::build`] compiles each stage on the CPU (naga), checks that
//! the stages link, and reports failures as [`ShaderDiagnostic`]s. Pipeline
//! creation from a built program lives in `render`.

mod compile;
mod diagnostic;
mod link;
mod program;
mod source;

pub use diagnostic::{Phase, ShaderDiagnostic, ShaderError, MAX_LOG_LEN};
pub use program::ShaderProgram;
pub use source::{ShaderSource, ShaderStage, StageSource};

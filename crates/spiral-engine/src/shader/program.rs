use crate::geometry::Vertex;

use super::compile::compile_stage;
use super::diagnostic::{ShaderDiagnostic, ShaderError};
use super::link::link;
use super::source::{ShaderSource, ShaderStage, StageSource};

/// A linked vertex + fragment pair, ready for pipeline creation.
///
/// Holds the validated sources and entry points; the intermediate per-stage
/// modules are released once linking succeeds.
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderProgram {
    name: String,
    vertex: StageSource,
    fragment: StageSource,
}

impl ShaderProgram {
    /// Compiles both stages and links them against the [`Vertex`] buffer layout.
    ///
    /// Both stages are compiled even if the first fails so that every problem
    /// is reported in one go. Each diagnostic is logged at `error` as it is
    /// produced and returned in the [`ShaderError`].
    pub fn build(source: &ShaderSource) -> Result<Self, ShaderError> {
        let mut diagnostics = Vec::new();

        let mut compile = |stage: ShaderStage| match compile_stage(stage, source.stage(stage)) {
            Ok(compiled) => Some(compiled),
            Err(d) => {
                report(&d);
                diagnostics.push(d);
                None
            }
        };

        let vertex = compile(ShaderStage::Vertex);
        let fragment = compile(ShaderStage::Fragment);

        if let (Some(v), Some(f)) = (&vertex, &fragment) {
            if let Err(d) = link(v, f, Vertex::layout().attributes) {
                report(&d);
                diagnostics.push(d);
            }
        }

        if !diagnostics.is_empty() {
            return Err(ShaderError {
                program: source.name.to_string(),
                diagnostics,
            });
        }

        log::debug!("shader program `{}` linked", source.name);

        Ok(Self {
            name: source.name.to_string(),
            vertex: source.vertex.clone(),
            fragment: source.fragment.clone(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertex(&self) -> &StageSource {
        &self.vertex
    }

    pub fn fragment(&self) -> &StageSource {
        &self.fragment
    }
}

fn report(d: &ShaderDiagnostic) {
    log::error!("{d}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::Phase;

    #[test]
    fn builtin_program_builds() {
        let program = ShaderProgram::build(&ShaderSource::spiral()).unwrap();
        assert_eq!(program.name(), "spiral");
        assert_eq!(program.vertex().entry_point, "vs_main");
        assert_eq!(program.fragment().entry_point, "fs_main");
    }

    #[test]
    fn invalid_vertex_source_reports_vertex_diagnostic() {
        let mut src = ShaderSource::spiral();
        src.vertex.code = "this is not a shader".into();

        let err = ShaderProgram::build(&src).unwrap_err();
        assert_eq!(err.diagnostics.len(), 1);

        let d = err.find(Phase::Compile(ShaderStage::Vertex)).unwrap();
        assert!(!d.log.is_empty());
        assert!(d.to_string().contains("VERTEX"));
    }

    #[test]
    fn both_stages_are_compiled_even_if_vertex_fails() {
        let mut src = ShaderSource::spiral();
        src.vertex.code = "fn (".into();
        src.fragment.code = "fn (".into();

        let err = ShaderProgram::build(&src).unwrap_err();
        let phases: Vec<Phase> = err.diagnostics.iter().map(|d| d.phase).collect();
        assert_eq!(
            phases,
            vec![
                Phase::Compile(ShaderStage::Vertex),
                Phase::Compile(ShaderStage::Fragment)
            ]
        );
    }

    #[test]
    fn link_failure_is_reported_as_program() {
        let mut src = ShaderSource::spiral();
        src.fragment.code = "
            @fragment
            fn fs_main(@location(5) c: vec3<f32>) -> @location(0) vec4<f32> {
                return vec4<f32>(c, 1.0);
            }
        "
        .into();

        let err = ShaderProgram::build(&src).unwrap_err();
        let d = err.find(Phase::Link).unwrap();
        assert!(d.log.contains("@location(5)"));
        assert_eq!(err.to_string(), "shader program `spiral` failed to build (PROGRAM)");
    }

    #[test]
    fn vertex_input_outside_buffer_layout_is_a_link_failure() {
        let mut src = ShaderSource::spiral();
        src.vertex.code = "
            struct Out { @builtin(position) pos: vec4<f32>, @location(0) color: vec3<f32> };
            @vertex
            fn vs_main(@location(7) pos: vec4<u32>) -> Out {
                var o: Out;
                o.pos = vec4<f32>(pos);
                return o;
            }
        "
        .into();

        let err = ShaderProgram::build(&src).unwrap_err();
        assert_eq!(err.diagnostics.len(), 1);
        assert!(err.find(Phase::Link).unwrap().log.contains("@location(7)"));
    }
}

use naga::front::wgsl;
use naga::valid::{Capabilities, ValidationFlags, Validator};

use super::diagnostic::{Phase, ShaderDiagnostic};
use super::source::{ShaderStage, StageSource};

/// A stage that parsed, validated and exposes the requested entry point.
///
/// Only lives until linking; the program keeps the source, not the module.
pub(crate) struct CompiledStage {
    pub stage: ShaderStage,
    pub module: naga::Module,
    /// Index into `module.entry_points`.
    pub entry_index: usize,
}

impl CompiledStage {
    pub fn entry_point(&self) -> &naga::EntryPoint {
        &self.module.entry_points[self.entry_index]
    }
}

/// Compiles one stage: WGSL parse, module validation, entry point lookup.
pub(crate) fn compile_stage(
    stage: ShaderStage,
    source: &StageSource,
) -> Result<CompiledStage, ShaderDiagnostic> {
    let phase = Phase::Compile(stage);
    let code = source.code.as_ref();

    let module = wgsl::parse_str(code)
        .map_err(|e| ShaderDiagnostic::new(phase, e.emit_to_string(code)))?;

    Validator::new(ValidationFlags::all(), Capabilities::default())
        .validate(&module)
        .map_err(|e| ShaderDiagnostic::new(phase, e.emit_to_string(code)))?;

    let wanted = stage.naga_stage();
    let entry_index = module
        .entry_points
        .iter()
        .position(|ep| ep.stage == wanted && ep.name == source.entry_point)
        .ok_or_else(|| {
            ShaderDiagnostic::new(
                phase,
                format!(
                    "no {} entry point named `{}`",
                    stage_attribute(stage),
                    source.entry_point
                ),
            )
        })?;

    Ok(CompiledStage {
        stage,
        module,
        entry_index,
    })
}

fn stage_attribute(stage: ShaderStage) -> &'static str {
    match stage {
        ShaderStage::Vertex => "@vertex",
        ShaderStage::Fragment => "@fragment",
    }
}

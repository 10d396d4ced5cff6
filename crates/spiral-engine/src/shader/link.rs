use naga::{Binding, BuiltIn, Handle, Module, ScalarKind, Type, TypeInner};

use super::compile::CompiledStage;
use super::diagnostic::{Phase, ShaderDiagnostic};

/// One slot of a stage interface, with its type resolved out of the module.
#[derive(Debug, Clone, PartialEq)]
enum Slot {
    Location(u32, TypeInner),
    Position,
}

/// Checks that `vertex` only consumes what the vertex buffer provides and that
/// `fragment` only consumes what `vertex` produces.
///
/// Every `@location` input of the vertex entry point needs an attribute at the
/// same shader location whose format fits the declared type. Every `@location`
/// input of the fragment entry point needs a vertex output at the same location
/// and of the same type, and the vertex entry point must write
/// `@builtin(position)`.
pub(crate) fn link(
    vertex: &CompiledStage,
    fragment: &CompiledStage,
    attributes: &[wgpu::VertexAttribute],
) -> Result<(), ShaderDiagnostic> {
    let mut vertex_inputs = Vec::new();
    for arg in &vertex.entry_point().function.arguments {
        collect(&vertex.module, arg.ty, arg.binding.as_ref(), &mut vertex_inputs);
    }

    let mut outputs = Vec::new();
    if let Some(result) = &vertex.entry_point().function.result {
        collect(&vertex.module, result.ty, result.binding.as_ref(), &mut outputs);
    }

    let mut inputs = Vec::new();
    for arg in &fragment.entry_point().function.arguments {
        collect(&fragment.module, arg.ty, arg.binding.as_ref(), &mut inputs);
    }

    let mut problems = Vec::new();

    for input in &vertex_inputs {
        let Slot::Location(location, ty) = input else { continue };

        match attributes.iter().find(|a| a.shader_location == *location) {
            None => problems.push(format!(
                "vertex input @location({location}) is not provided by the vertex buffer layout"
            )),
            Some(attr) if !accepts(ty, attr.format) => problems.push(format!(
                "@location({location}) type mismatch: vertex buffer provides {:?}, vertex stage reads {}",
                attr.format,
                describe(ty)
            )),
            Some(_) => {}
        }
    }

    if !outputs.contains(&Slot::Position) {
        problems.push(format!(
            "vertex entry point `{}` does not write @builtin(position)",
            vertex.entry_point().name
        ));
    }

    for input in &inputs {
        let Slot::Location(location, ty) = input else { continue };

        let produced = outputs.iter().find_map(|o| match o {
            Slot::Location(l, t) if l == location => Some(t),
            _ => None,
        });

        match produced {
            None => problems.push(format!(
                "fragment input @location({location}) is not written by the vertex stage"
            )),
            Some(t) if t != ty => problems.push(format!(
                "@location({location}) type mismatch: vertex writes {}, fragment reads {}",
                describe(t),
                describe(ty)
            )),
            Some(_) => {}
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(ShaderDiagnostic::new(Phase::Link, problems.join("\n")))
    }
}

fn collect(module: &Module, ty: Handle<Type>, binding: Option<&Binding>, out: &mut Vec<Slot>) {
    match binding {
        Some(Binding::Location { location, .. }) => {
            out.push(Slot::Location(*location, module.types[ty].inner.clone()));
        }
        Some(Binding::BuiltIn(BuiltIn::Position { .. })) => out.push(Slot::Position),
        Some(Binding::BuiltIn(_)) => {}
        None => {
            if let TypeInner::Struct { members, .. } = &module.types[ty].inner {
                for m in members {
                    collect(module, m.ty, m.binding.as_ref(), out);
                }
            }
        }
    }
}

/// Whether an attribute of `format` can feed a shader input of type `ty`.
///
/// The scalar kind must match and the shader may declare more components than
/// the buffer supplies. Formats outside the 32-bit families are not checked.
fn accepts(ty: &TypeInner, format: wgpu::VertexFormat) -> bool {
    let Some((kind, count)) = components(format) else {
        return true;
    };
    let (scalar, size) = match ty {
        TypeInner::Scalar(s) => (s, 1),
        TypeInner::Vector { size, scalar } => (scalar, *size as u8),
        _ => return false,
    };
    scalar.kind == kind && scalar.width == 4 && count <= size
}

fn components(format: wgpu::VertexFormat) -> Option<(ScalarKind, u8)> {
    use wgpu::VertexFormat as F;

    let c = match format {
        F::Float32 => (ScalarKind::Float, 1),
        F::Float32x2 => (ScalarKind::Float, 2),
        F::Float32x3 => (ScalarKind::Float, 3),
        F::Float32x4 => (ScalarKind::Float, 4),
        F::Uint32 => (ScalarKind::Uint, 1),
        F::Uint32x2 => (ScalarKind::Uint, 2),
        F::Uint32x3 => (ScalarKind::Uint, 3),
        F::Uint32x4 => (ScalarKind::Uint, 4),
        F::Sint32 => (ScalarKind::Sint, 1),
        F::Sint32x2 => (ScalarKind::Sint, 2),
        F::Sint32x3 => (ScalarKind::Sint, 3),
        F::Sint32x4 => (ScalarKind::Sint, 4),
        _ => return None,
    };
    Some(c)
}

fn describe(ty: &TypeInner) -> String {
    match ty {
        TypeInner::Scalar(s) => format!("{:?}{}", s.kind, s.width * 8),
        TypeInner::Vector { size, scalar } => {
            format!("vec{}<{:?}{}>", *size as u8, scalar.kind, scalar.width * 8)
        }
        other => format!("{other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Vertex;
    use crate::shader::compile::compile_stage;
    use crate::shader::{ShaderSource, ShaderStage, StageSource};

    fn stages(vs: &str, fs: &str) -> (CompiledStage, CompiledStage) {
        let v = compile_stage(ShaderStage::Vertex, &StageSource::new(vs.to_string(), "vs_main")).unwrap();
        let f = compile_stage(ShaderStage::Fragment, &StageSource::new(fs.to_string(), "fs_main")).unwrap();
        (v, f)
    }

    fn link_spiral_layout(v: &CompiledStage, f: &CompiledStage) -> Result<(), ShaderDiagnostic> {
        link(v, f, Vertex::layout().attributes)
    }

    const FS_SPIRAL: &str = include_str!("shaders/spiral.frag.wgsl");

    const FS_VEC3: &str =
        "@fragment fn fs_main(@location(0) c: vec3<f32>) -> @location(0) vec4<f32> { return vec4<f32>(c, 1.0); }";

    #[test]
    fn builtin_pair_links() {
        let src = ShaderSource::spiral();
        let v = compile_stage(ShaderStage::Vertex, &src.vertex).unwrap();
        let f = compile_stage(ShaderStage::Fragment, &src.fragment).unwrap();
        assert!(link_spiral_layout(&v, &f).is_ok());
    }

    #[test]
    fn type_mismatch_fails_link() {
        let vs = "
            struct Out { @builtin(position) pos: vec4<f32>, @location(0) c: vec4<f32> };
            @vertex fn vs_main() -> Out { var o: Out; return o; }
        ";
        let (v, f) = stages(vs, FS_VEC3);
        let diag = link_spiral_layout(&v, &f).unwrap_err();
        assert_eq!(diag.phase, Phase::Link);
        assert!(diag.to_string().starts_with("PROGRAM"));
        assert!(diag.log.contains("@location(0) type mismatch"));
    }

    #[test]
    fn unwritten_location_fails_link() {
        let vs = "@vertex fn vs_main() -> @builtin(position) vec4<f32> { return vec4<f32>(0.0); }";
        let (v, f) = stages(vs, FS_VEC3);
        let diag = link_spiral_layout(&v, &f).unwrap_err();
        assert!(diag.log.contains("@location(0) is not written"));
    }

    #[test]
    fn extra_vertex_outputs_are_allowed() {
        let vs = "
            struct Out {
                @builtin(position) pos: vec4<f32>,
                @location(0) c: vec3<f32>,
                @location(3) unused: f32,
            };
            @vertex fn vs_main() -> Out { var o: Out; return o; }
        ";
        let (v, f) = stages(vs, FS_VEC3);
        assert!(link_spiral_layout(&v, &f).is_ok());
    }

    #[test]
    fn vertex_input_missing_from_layout_fails_link() {
        let vs = "
            struct Out { @builtin(position) pos: vec4<f32>, @location(0) color: vec3<f32> };
            @vertex fn vs_main(@location(7) pos: vec4<u32>) -> Out {
                var o: Out;
                o.pos = vec4<f32>(pos);
                return o;
            }
        ";
        let (v, f) = stages(vs, FS_SPIRAL);
        let diag = link_spiral_layout(&v, &f).unwrap_err();
        assert_eq!(diag.phase, Phase::Link);
        assert!(diag.log.contains("vertex input @location(7) is not provided"));
    }

    #[test]
    fn vertex_input_kind_mismatch_fails_link() {
        let vs = "
            struct Out { @builtin(position) pos: vec4<f32>, @location(0) color: vec3<f32> };
            @vertex fn vs_main(@location(0) pos: vec3<u32>) -> Out {
                var o: Out;
                o.pos = vec4<f32>(vec3<f32>(pos), 1.0);
                return o;
            }
        ";
        let (v, f) = stages(vs, FS_SPIRAL);
        let diag = link_spiral_layout(&v, &f).unwrap_err();
        assert!(diag.log.contains("vertex buffer provides Float32x3"));
    }

    #[test]
    fn wider_vertex_input_accepts_narrower_attribute() {
        let vs = "
            struct Out { @builtin(position) pos: vec4<f32>, @location(0) color: vec3<f32> };
            @vertex fn vs_main(@location(0) pos: vec4<f32>, @location(1) c: vec3<f32>) -> Out {
                var o: Out;
                o.pos = pos;
                o.color = c;
                return o;
            }
        ";
        let (v, f) = stages(vs, FS_SPIRAL);
        assert!(link_spiral_layout(&v, &f).is_ok());
    }
}

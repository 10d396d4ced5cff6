use std::borrow::Cow;

/// Pipeline stage a piece of shader source belongs to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    /// Upper-case tag used in diagnostics.
    pub fn tag(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "VERTEX",
            ShaderStage::Fragment => "FRAGMENT",
        }
    }

    pub(crate) fn naga_stage(self) -> naga::ShaderStage {
        match self {
            ShaderStage::Vertex => naga::ShaderStage::Vertex,
            ShaderStage::Fragment => naga::ShaderStage::Fragment,
        }
    }
}

/// WGSL text of one stage plus the entry point to use from it.
#[derive(Debug, Clone, PartialEq)]
pub struct StageSource {
    pub code: Cow<'static, str>,
    pub entry_point: Cow<'static, str>,
}

impl StageSource {
    pub fn new(code: impl Into<Cow<'static, str>>, entry_point: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code: code.into(),
            entry_point: entry_point.into(),
        }
    }
}

/// Named shader resource: one vertex stage and one fragment stage.
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderSource {
    pub name: Cow<'static, str>,
    pub vertex: StageSource,
    pub fragment: StageSource,
}

impl ShaderSource {
    /// The built-in pipeline: passes position through and colors by vertex.
    pub fn spiral() -> Self {
        Self {
            name: Cow::Borrowed("spiral"),
            vertex: StageSource::new(include_str!("shaders/spiral.vert.wgsl"), "vs_main"),
            fragment: StageSource::new(include_str!("shaders/spiral.frag.wgsl"), "fs_main"),
        }
    }

    pub fn stage(&self, stage: ShaderStage) -> &StageSource {
        match stage {
            ShaderStage::Vertex => &self.vertex,
            ShaderStage::Fragment => &self.fragment,
        }
    }
}

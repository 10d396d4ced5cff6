use std::fmt;

use super::source::ShaderStage;

/// Upper bound on the characters kept from a compiler or linker log.
pub const MAX_LOG_LEN: usize = 511;

/// Where a diagnostic was produced.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Phase {
    Compile(ShaderStage),
    Link,
}

impl Phase {
    pub fn tag(self) -> &'static str {
        match self {
            Phase::Compile(stage) => stage.tag(),
            Phase::Link => "PROGRAM",
        }
    }
}

/// One compile or link failure with the raw compiler/linker log.
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderDiagnostic {
    pub phase: Phase,
    /// Compiler/linker text, at most [`MAX_LOG_LEN`] characters.
    pub log: String,
}

impl ShaderDiagnostic {
    pub(crate) fn new(phase: Phase, log: impl Into<String>) -> Self {
        Self {
            phase,
            log: bounded_log(log.into()),
        }
    }
}

impl fmt::Display for ShaderDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.phase {
            Phase::Compile(_) => write!(f, "{} shader compilation failed:\n{}", self.phase.tag(), self.log),
            Phase::Link => write!(f, "{} linking failed:\n{}", self.phase.tag(), self.log),
        }
    }
}

/// A shader program that did not build.
///
/// Carries every diagnostic emitted: both stages are always compiled, so a
/// program with two broken stages reports two compile diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderError {
    pub program: String,
    pub diagnostics: Vec<ShaderDiagnostic>,
}

impl ShaderError {
    /// First diagnostic for `phase`, if any.
    pub fn find(&self, phase: Phase) -> Option<&ShaderDiagnostic> {
        self.diagnostics.iter().find(|d| d.phase == phase)
    }
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "shader program `{}` failed to build (", self.program)?;
        for (i, d) in self.diagnostics.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(d.phase.tag())?;
        }
        f.write_str(")")
    }
}

impl std::error::Error for ShaderError {}

fn bounded_log(mut log: String) -> String {
    let trimmed_len = log.trim_end().len();
    log.truncate(trimmed_len);

    if let Some((cut, _)) = log.char_indices().nth(MAX_LOG_LEN) {
        log.truncate(cut);
    }
    log
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_name_the_stage() {
        assert_eq!(Phase::Compile(ShaderStage::Vertex).tag(), "VERTEX");
        assert_eq!(Phase::Compile(ShaderStage::Fragment).tag(), "FRAGMENT");
        assert_eq!(Phase::Link.tag(), "PROGRAM");
    }

    #[test]
    fn display_contains_tag_and_log() {
        let d = ShaderDiagnostic::new(Phase::Compile(ShaderStage::Vertex), "expected `;`");
        let text = d.to_string();
        assert!(text.starts_with("VERTEX"));
        assert!(text.ends_with("expected `;`"));
    }

    #[test]
    fn long_logs_are_bounded() {
        let d = ShaderDiagnostic::new(Phase::Link, "x".repeat(2000));
        assert_eq!(d.log.chars().count(), MAX_LOG_LEN);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let d = ShaderDiagnostic::new(Phase::Link, "é".repeat(600));
        assert_eq!(d.log.chars().count(), MAX_LOG_LEN);
        assert!(d.log.chars().all(|c| c == 'é'));
    }

    #[test]
    fn short_logs_only_lose_trailing_whitespace() {
        let d = ShaderDiagnostic::new(Phase::Link, "missing output\n\n");
        assert_eq!(d.log, "missing output");
    }

    #[test]
    fn error_summary_names_every_failed_phase() {
        let err = ShaderError {
            program: "spiral".into(),
            diagnostics: vec![
                ShaderDiagnostic::new(Phase::Compile(ShaderStage::Vertex), "bad vertex"),
                ShaderDiagnostic::new(Phase::Compile(ShaderStage::Fragment), "bad fragment"),
            ],
        };
        let text = err.to_string();
        assert_eq!(text, "shader program `spiral` failed to build (VERTEX, FRAGMENT)");
        // Logs are reported per diagnostic when produced, not repeated here.
        assert!(!text.contains("bad vertex"));
        assert!(err.find(Phase::Link).is_none());
    }
}

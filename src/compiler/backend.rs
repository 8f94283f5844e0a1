//! Backend identity and construction.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::util::config::ToolchainSettings;
use crate::util::process::ProcessRunner;

use super::{CCompiler, Compiler, GoCompiler};

/// Identifier for a compiler backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendId {
    /// MinGW C/C++ cross compiler
    #[default]
    C,
    /// Go toolchain
    Go,
}

impl BackendId {
    /// All built-in backends.
    pub const ALL: [BackendId; 2] = [BackendId::C, BackendId::Go];

    pub fn as_str(&self) -> &'static str {
        match self {
            BackendId::C => "c",
            BackendId::Go => "go",
        }
    }
}

impl std::str::FromStr for BackendId {
    type Err = BackendIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "c" | "cpp" | "c++" | "mingw" => Ok(BackendId::C),
            "go" | "golang" => Ok(BackendId::Go),
            _ => Err(BackendIdParseError(s.to_string())),
        }
    }
}

impl std::fmt::Display for BackendId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown backend name.
#[derive(Debug, Clone)]
pub struct BackendIdParseError(pub String);

impl std::fmt::Display for BackendIdParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown backend '{}', valid values: c, go", self.0)
    }
}

impl std::error::Error for BackendIdParseError {}

/// Create a fresh compiler for one build attempt.
///
/// Instances are never shared between builds; call this once per build.
pub fn create_compiler(
    id: BackendId,
    settings: &ToolchainSettings,
    runner: Option<Arc<dyn ProcessRunner>>,
) -> Box<dyn Compiler> {
    match (id, runner) {
        (BackendId::C, Some(runner)) => Box::new(CCompiler::new(settings).with_runner(runner)),
        (BackendId::C, None) => Box::new(CCompiler::new(settings)),
        (BackendId::Go, Some(runner)) => Box::new(GoCompiler::new(settings).with_runner(runner)),
        (BackendId::Go, None) => Box::new(GoCompiler::new(settings)),
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::core::descriptor::{BuildDescriptor, BuildMode, TargetOs};
    use crate::test_support::{MockProcessOutput, MockRunner};

    #[test]
    fn test_backend_id_parse() {
        assert_eq!("c".parse::<BackendId>().unwrap(), BackendId::C);
        assert_eq!("Go".parse::<BackendId>().unwrap(), BackendId::Go);
        assert!("rust".parse::<BackendId>().is_err());
        assert_eq!(BackendId::Go.to_string(), "go");
    }

    #[test]
    fn test_backends_are_interchangeable() {
        let runner = Arc::new(MockRunner::new());
        runner.set_default(MockProcessOutput::success("ok"));

        for id in BackendId::ALL {
            let runner: Arc<dyn ProcessRunner> = runner.clone();
            let mut compiler = create_compiler(id, &ToolchainSettings::default(), Some(runner));
            assert_eq!(compiler.backend(), id);

            let (_, mode) = compiler.is_type_supported("dll").unwrap();
            compiler
                .prepare_build(&BuildDescriptor::new("/work", TargetOs::Windows).with_build_mode(mode))
                .unwrap();
            let out = compiler
                .build(Path::new("payload"), Path::new("/out/payload.dll"))
                .unwrap();
            assert_eq!(out, b"ok");
        }

        assert_eq!(runner.calls().len(), 2);
        assert!(runner.calls()[0].args.contains(&"-shared".to_string()));
        assert!(runner.calls()[1]
            .args
            .contains(&format!("-buildmode={}", BuildMode::SharedLibrary.as_go_mode())));
    }
}

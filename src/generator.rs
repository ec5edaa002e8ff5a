//! The stub-generation facade.
//!
//! [`StubGenerator`] is what callers construct: it dispatches to the
//! emitter with per-type options (event-channel allow-list, extra
//! class-level lines) resolved from configuration. The generator is a
//! stateless utility; callers own the dumps and the configuration, and
//! persistence of the returned text is a separate collaborator
//! ([`crate::sidecar::SidecarStore`]).

use crate::config::Config;
use crate::emitter::StubEmitter;
use crate::error::{Error, Result};
use crate::types::{CallableDump, ReflectionDump, TypeDump};

/// Generates stub declaration text for types, functions, and whole
/// modules.
#[derive(Debug, Default)]
pub struct StubGenerator;

impl StubGenerator {
    /// Creates a generator.
    pub fn new() -> Self {
        Self
    }

    /// The stub declaration for one type, with an explicit allow-list
    /// and extra lines. Ends with a newline.
    pub fn type_stub(
        &self,
        dump: &TypeDump,
        channels: Option<&[String]>,
        extra_lines: &[String],
    ) -> Result<String> {
        let emitter = StubEmitter::new(channels, extra_lines);
        let mut text = emitter.emit_type(dump)?;
        text.push('\n');
        Ok(text)
    }

    /// The stub declaration for one standalone function. Ends with a
    /// newline.
    pub fn function_stub(&self, callable: &CallableDump) -> Result<String> {
        let emitter = StubEmitter::new(None, &[]);
        let mut text = emitter.emit_function(callable)?;
        text.push('\n');
        Ok(text)
    }

    /// The stub text for an entire dump: every type, then every free
    /// function, in dump order, separated by two blank lines (one
    /// sidecar per module, the way the host consumes them).
    pub fn module_stub(&self, dump: &ReflectionDump, config: &Config) -> Result<String> {
        let mut declarations: Vec<String> = Vec::new();
        for dumped_type in &dump.types {
            let emitter = StubEmitter::new(
                config.channels_for(&dumped_type.name),
                config.extra_for(&dumped_type.name),
            );
            declarations.push(emitter.emit_type(dumped_type)?);
        }
        let function_emitter = StubEmitter::new(None, &[]);
        for function in &dump.functions {
            declarations.push(function_emitter.emit_function(function)?);
        }

        let mut text = declarations.join("\n\n\n");
        text.push('\n');
        Ok(text)
    }

    /// The stub for a single declaration of `dump`, looked up by display
    /// name across types and functions.
    pub fn single_stub(&self, dump: &ReflectionDump, config: &Config, name: &str) -> Result<String> {
        if let Some(dumped_type) = dump.types.iter().find(|t| t.name == name) {
            return self.type_stub(
                dumped_type,
                config.channels_for(name),
                config.extra_for(name),
            );
        }
        if let Some(function) = dump.functions.iter().find(|f| f.name == name) {
            return self.function_stub(function);
        }
        Err(Error::KeyNotFound {
            key: format!("{:?}", name),
        })
    }
}

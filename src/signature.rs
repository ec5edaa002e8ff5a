//! Signature synthesis.
//!
//! Reconstructs a callable's declared signature text (parameter names,
//! annotations, default values, return type) from the partial metadata a
//! reflection dump records. The dump does not say *which* parameters had
//! defaults, only that the last N did, so default matching walks both
//! lists from the back before restoring declaration order.

use crate::error::{Error, Result};
use crate::types::{CallableDump, DefaultValue, ParamDump};

/// The synthetic leading parameter a signature is rendered with.
///
/// The receiver is requested by the emission context, not recorded per
/// parameter, and is never subject to default matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Receiver {
    /// No implicit receiver (free functions, static methods).
    None,
    /// The instance itself; rendered as `self`.
    Instance,
    /// The type itself; rendered as `cls`.
    Type,
}

/// Render the full signature text: `(params) -> Ret` (the return suffix
/// is omitted when the callable declares no return annotation).
pub fn signature(callable: &CallableDump, receiver: Receiver) -> Result<String> {
    Ok(format!(
        "({}){}",
        parameter_list(callable, receiver)?,
        return_suffix(callable)
    ))
}

/// Render the comma-separated parameter list in declaration order.
///
/// Defaults are matched to parameters from the *last* parameter backward
/// (the runtime only records "the last N had defaults"), then the
/// assembled list is reversed back into declaration order. A dump with
/// more defaults than parameters is malformed and aborts generation.
pub fn parameter_list(callable: &CallableDump, receiver: Receiver) -> Result<String> {
    let params = &callable.params;
    let defaults = &callable.defaults;

    if defaults.len() > params.len() {
        return Err(Error::MalformedSignatureMetadata {
            member: callable.name.clone(),
            params: params.len(),
            defaults: defaults.len(),
        });
    }

    let mut rendered: Vec<String> = Vec::with_capacity(params.len() + 1);
    for (offset_from_end, param) in params.iter().rev().enumerate() {
        let default = if offset_from_end < defaults.len() {
            Some(&defaults[defaults.len() - 1 - offset_from_end])
        } else {
            None
        };
        rendered.push(render_param(param, default));
    }
    rendered.reverse();

    match receiver {
        Receiver::None => {}
        Receiver::Instance => rendered.insert(0, "self".to_string()),
        Receiver::Type => rendered.insert(0, "cls".to_string()),
    }

    Ok(rendered.join(", "))
}

/// Render the arrow-suffix for the return annotation, or nothing at all
/// when no return annotation exists.
pub fn return_suffix(callable: &CallableDump) -> String {
    callable
        .return_type
        .as_ref()
        .map(|t| format!(" -> {}", t.render()))
        .unwrap_or_default()
}

/// Render one parameter: `name`, `name: T`, `name = d`, or
/// `name: T = d`.
fn render_param(param: &ParamDump, default: Option<&DefaultValue>) -> String {
    let mut text = param.name.clone();
    if let Some(annotation) = &param.annotation {
        text.push_str(": ");
        text.push_str(annotation.render());
    }
    if let Some(default) = default {
        text.push_str(" = ");
        text.push_str(&default.render());
    }
    text
}

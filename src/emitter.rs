//! Stub emission.
//!
//! This module assembles classified members and synthesized signatures
//! into the textual declaration for a function or a full type. Output is
//! line-oriented with one tab per indentation level, and byte-stable: a
//! fixed dump and a fixed allow-list always produce identical text,
//! since member enumeration order is taken from the dump and never
//! re-sorted.
//!
//! Type bodies follow a fixed section order (event channels, caller
//! extra lines, fields, constructor, methods and lazy attributes,
//! accessor properties) with exactly one blank line between non-empty
//! sections. Generation is all-or-nothing; no partial text escapes on
//! error.

use crate::classifier::MemberClassifier;
use crate::error::Result;
use crate::signature::{self, Receiver};
use crate::types::{Binding, CallableDump, MemberKind, TypeDump};

/// Assembles stub declarations for types and functions.
pub struct StubEmitter<'a> {
    classifier: MemberClassifier<'a>,
    extra_lines: &'a [String],
}

impl<'a> StubEmitter<'a> {
    /// Creates an emitter.
    ///
    /// `channel_allow_list` holds declared event-channel signatures
    /// (channels not listed are dropped); `extra_lines` are class-level
    /// declarations spliced into every emitted type verbatim.
    pub fn new(channel_allow_list: Option<&'a [String]>, extra_lines: &'a [String]) -> Self {
        Self {
            classifier: MemberClassifier::new(channel_allow_list),
            extra_lines,
        }
    }

    /// Emit the multi-line declaration block for a type.
    pub fn emit_type(&self, dump: &TypeDump) -> Result<String> {
        let mut events: Vec<String> = Vec::new();
        let mut markers: Vec<String> = Vec::new();
        let mut plain_fields: Vec<String> = Vec::new();
        let mut methods: Vec<String> = Vec::new();
        let mut properties: Vec<String> = Vec::new();

        for member in self.classifier.classify_type(dump) {
            match &member.kind {
                MemberKind::EventChannel { signature } => events.push(format!(
                    "\t{} : EventChannel = ...  # {}",
                    member.name, signature
                )),
                MemberKind::ReadOnlyMarker { marker_type } => markers.push(format!(
                    "\t{}: {} = {}()",
                    member.name, marker_type, marker_type
                )),
                MemberKind::PlainField { declared_type } => {
                    plain_fields.push(match declared_type {
                        Some(t) => format!("\t{}: {} = ...", member.name, t.render()),
                        None => format!("\t{} = ...", member.name),
                    })
                }
                MemberKind::PlainMethod(callable) => {
                    methods.push(def_block("\t", &member.name, callable, Receiver::Instance, &[])?)
                }
                MemberKind::TypeBoundMethod(callable) => methods.push(def_block(
                    "\t",
                    &member.name,
                    callable,
                    Receiver::Type,
                    &["classmethod"],
                )?),
                MemberKind::StaticMethod(callable) => methods.push(def_block(
                    "\t",
                    &member.name,
                    callable,
                    Receiver::None,
                    &["staticmethod"],
                )?),
                MemberKind::LazyAttribute(callable) => methods.push(def_block(
                    "\t",
                    &member.name,
                    callable,
                    Receiver::Instance,
                    &["cached_property"],
                )?),
                MemberKind::AccessorProperty {
                    read,
                    write,
                    delete,
                } => {
                    // All sub-declarations carry the property's own name;
                    // the underlying functions may be named anything.
                    let mut block = vec![def_block(
                        "\t",
                        &member.name,
                        read,
                        Receiver::Instance,
                        &["property"],
                    )?];
                    if let Some(write) = write {
                        let setter = format!("{}.setter", member.name);
                        block.push(def_block(
                            "\t",
                            &member.name,
                            write,
                            Receiver::Instance,
                            &[&setter],
                        )?);
                    }
                    if let Some(delete) = delete {
                        let deleter = format!("{}.deleter", member.name);
                        block.push(def_block(
                            "\t",
                            &member.name,
                            delete,
                            Receiver::Instance,
                            &[&deleter],
                        )?);
                    }
                    properties.push(block.join("\n"));
                }
            }
        }

        let constructor = dump
            .constructor
            .as_ref()
            .map(|ctor| {
                let (receiver, annotations) = receiver_for(ctor.binding);
                def_block("\t", &ctor.name, ctor, receiver, &annotations)
            })
            .transpose()?;

        // Fixed body order; empty sections contribute nothing, non-empty
        // ones are separated by exactly one blank line.
        let mut sections: Vec<String> = Vec::new();
        if !events.is_empty() {
            sections.push(events.join("\n"));
        }
        if !self.extra_lines.is_empty() {
            let extra: Vec<String> = self
                .extra_lines
                .iter()
                .map(|line| format!("\t{}", line))
                .collect();
            sections.push(extra.join("\n"));
        }
        let mut fields = markers;
        fields.extend(plain_fields);
        if !fields.is_empty() {
            sections.push(fields.join("\n"));
        }
        if let Some(constructor) = constructor {
            sections.push(constructor);
        }
        if !methods.is_empty() {
            sections.push(methods.join("\n"));
        }
        if !properties.is_empty() {
            sections.push(properties.join("\n"));
        }

        let body = if sections.is_empty() {
            "\t...".to_string()
        } else {
            sections.join("\n\n")
        };

        let mut out = String::new();
        if dump.dataclass {
            out.push_str("@dataclass\n");
        }
        out.push_str(&header_line(dump));
        out.push('\n');
        out.push_str(&body);
        Ok(out)
    }

    /// Emit the declaration line(s) for a standalone function: optional
    /// wrapping annotations, then a single `def` line.
    pub fn emit_function(&self, callable: &CallableDump) -> Result<String> {
        let (receiver, annotations) = receiver_for(callable.binding);
        def_block("", &callable.name, callable, receiver, &annotations)
    }
}

/// The receiver and wrapping annotations implied by a binding.
fn receiver_for(binding: Binding) -> (Receiver, Vec<&'static str>) {
    match binding {
        Binding::Instance => (Receiver::Instance, vec![]),
        Binding::Type => (Receiver::Type, vec!["classmethod"]),
        Binding::Static => (Receiver::None, vec!["staticmethod"]),
        Binding::Free => (Receiver::None, vec![]),
    }
}

/// The `class Name…:` header: parenthesized non-trivial bases, with the
/// type-level factory appended as a `metaclass=` clause inside the same
/// parentheses (or parenthesized alone when there are no bases).
fn header_line(dump: &TypeDump) -> String {
    let mut clause: Vec<String> = dump
        .bases
        .iter()
        .filter(|base| base.as_str() != "object")
        .cloned()
        .collect();
    if let Some(metaclass) = &dump.metaclass {
        clause.push(format!("metaclass={}", metaclass));
    }

    if clause.is_empty() {
        format!("class {}:", dump.name)
    } else {
        format!("class {}({}):", dump.name, clause.join(", "))
    }
}

/// One `def` declaration with its annotation lines and empty-body marker.
fn def_block(
    indent: &str,
    name: &str,
    callable: &CallableDump,
    receiver: Receiver,
    annotations: &[&str],
) -> Result<String> {
    let mut lines: Vec<String> = annotations
        .iter()
        .map(|annotation| format!("{}@{}", indent, annotation))
        .collect();
    lines.push(format!(
        "{}def {}({}){}: ...",
        indent,
        name,
        signature::parameter_list(callable, receiver)?,
        signature::return_suffix(callable)
    ));
    Ok(lines.join("\n"))
}

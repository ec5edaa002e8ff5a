//! Data types used throughout stubforge.
//!
//! This module contains the "model" structs and enums that represent a
//! reflection dump (types, callables, accessors, event channels, fields)
//! as well as the classified-member types the emitter consumes. All data
//! is owned so nothing depends on the lifetime of the JSON document it
//! was deserialized from.

use serde::Deserialize;

use crate::error::{Error, Result};

/// A type annotation attached to a parameter, return slot, or field.
///
/// Deferred expressions were stored as text by the dumping host because
/// evaluation was postponed; they are rendered verbatim and never
/// evaluated here.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeExpr {
    /// A resolved type, stored by name (e.g. "int", "QColor").
    Resolved(String),
    /// An unresolved deferred type expression, stored as raw text
    /// (e.g. "_MessageBoxData | None").
    Deferred(String),
}

impl TypeExpr {
    /// The text to splice into a declaration. Both branches render their
    /// stored text; the distinction exists so callers never have to ask
    /// whether evaluation would be needed.
    pub fn render(&self) -> &str {
        match self {
            TypeExpr::Resolved(name) => name,
            TypeExpr::Deferred(text) => text,
        }
    }
}

/// A recorded default value for a trailing parameter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefaultValue {
    /// A string-valued default; re-quoted on emission.
    Str(String),
    /// Any other default, rendered via its literal textual form
    /// (e.g. "1", "None", "QMessageBox.Icon.NoIcon").
    Literal(String),
}

impl DefaultValue {
    /// Render the default as declaration text.
    pub fn render(&self) -> String {
        match self {
            DefaultValue::Str(s) => format!("'{}'", s),
            DefaultValue::Literal(text) => text.clone(),
        }
    }
}

/// How a callable receives its implicit first argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Binding {
    /// Bound to an instance; `self` is prepended on emission.
    #[default]
    Instance,
    /// Bound to the type itself; `cls` is prepended on emission.
    Type,
    /// No implicit receiver at all. Hosts whose reflection cannot
    /// observe this coerce such callables into type-bound ones; the
    /// dump format records it explicitly.
    Static,
    /// A free (module-level) function.
    Free,
}

/// Stores extracted parameter information for one parameter of a callable.
#[derive(Debug, Clone, Deserialize)]
pub struct ParamDump {
    /// The parameter name (e.g. "text").
    pub name: String,
    /// Optional declared annotation.
    #[serde(default, rename = "type")]
    pub annotation: Option<TypeExpr>,
}

/// Stores extracted callable information: a method, a lazy attribute's
/// underlying getter, an accessor sub-function, or a free function.
#[derive(Debug, Clone, Deserialize)]
pub struct CallableDump {
    /// The callable name (e.g. "colour_at").
    pub name: String,
    /// The receiver binding. Defaults to `Instance` for members.
    #[serde(default)]
    pub binding: Binding,
    /// Declared parameters in declaration order, excluding any implicit
    /// receiver.
    #[serde(default)]
    pub params: Vec<ParamDump>,
    /// Recorded defaults for the *trailing* parameters, in declaration
    /// order. The runtime only records "the last N had defaults", so
    /// matching walks both lists from the back.
    #[serde(default)]
    pub defaults: Vec<DefaultValue>,
    /// Optional declared return annotation.
    #[serde(default, rename = "return")]
    pub return_type: Option<TypeExpr>,
}

/// An accessor property: distinct read / optional-write / optional-delete
/// functions sharing one member name.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessorDump {
    /// The property name.
    pub name: String,
    /// The read function.
    pub read: CallableDump,
    /// The write function, if the property is writable.
    #[serde(default)]
    pub write: Option<CallableDump>,
    /// The delete function, if the property is deletable.
    #[serde(default)]
    pub delete: Option<CallableDump>,
}

/// A declared event channel. The declared parameter-type signature is not
/// recoverable from the runtime object, so it is supplied by the caller
/// through the channel allow-list instead.
#[derive(Debug, Clone, Deserialize)]
pub struct EventDump {
    /// The channel name (e.g. "colourChanged").
    pub name: String,
}

/// A plain or read-only-marker field.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldDump {
    /// The field name.
    pub name: String,
    /// Optional declared type. For read-only markers this names the
    /// marker type spliced into the emitted placeholder initializer.
    #[serde(default, rename = "type")]
    pub declared_type: Option<TypeExpr>,
    /// Whether writes through this field are rejected. Recorded as
    /// explicit metadata rather than sniffed from a runtime value.
    #[serde(default)]
    pub read_only: bool,
}

/// A member whose runtime shape the dumper could not model.
#[derive(Debug, Clone, Deserialize)]
pub struct OpaqueDump {
    /// The member name.
    pub name: String,
    /// A best-effort textual description of the runtime object, for
    /// diagnostics only.
    #[serde(default)]
    pub repr: Option<String>,
}

/// One member of a dumped type, tagged by the runtime shape the dumping
/// host observed.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RawMember {
    /// An ordinary callable (instance, type-bound, or static per its
    /// binding).
    Callable(CallableDump),
    /// A lazily-computed attribute wrapping a zero-argument callable,
    /// memoized on first access.
    Lazy(CallableDump),
    /// An accessor property.
    Accessor(AccessorDump),
    /// A declared event channel.
    Event(EventDump),
    /// A plain field or read-only marker.
    Field(FieldDump),
    /// An unrecognized member shape; skipped by the classifier.
    Opaque(OpaqueDump),
}

impl RawMember {
    /// The member's declared name.
    pub fn name(&self) -> &str {
        match self {
            RawMember::Callable(c) | RawMember::Lazy(c) => &c.name,
            RawMember::Accessor(a) => &a.name,
            RawMember::Event(e) => &e.name,
            RawMember::Field(f) => &f.name,
            RawMember::Opaque(o) => &o.name,
        }
    }
}

/// Stores extracted type information from a reflection dump.
#[derive(Debug, Clone, Deserialize)]
pub struct TypeDump {
    /// The type name (e.g. "Colour").
    pub name: String,
    /// Base type names as declared. "object" is structural and does not
    /// count as a base for header rendering.
    #[serde(default)]
    pub bases: Vec<String>,
    /// Optional type-level factory (metaclass) name.
    #[serde(default)]
    pub metaclass: Option<String>,
    /// Whether the type is a plain-data record; emits an outer
    /// `@dataclass` annotation.
    #[serde(default)]
    pub dataclass: bool,
    /// The constructor, dumped separately since structural dunder names
    /// are excluded from member enumeration.
    #[serde(default)]
    pub constructor: Option<CallableDump>,
    /// The members, in the host reflection API's enumeration order.
    /// This order is stable and is never re-sorted.
    #[serde(default)]
    pub members: Vec<RawMember>,
}

/// A whole reflection dump file: every type and free function captured
/// from one host module.
#[derive(Debug, Clone, Deserialize)]
pub struct ReflectionDump {
    /// The dumped module's name, if the host recorded one.
    #[serde(default)]
    pub module: Option<String>,
    /// Dumped types, in declaration order.
    #[serde(default)]
    pub types: Vec<TypeDump>,
    /// Dumped free functions, in declaration order.
    #[serde(default)]
    pub functions: Vec<CallableDump>,
}

/// The category a member was classified into, together with the metadata
/// the emitter needs for that category.
#[derive(Debug, Clone)]
pub enum MemberKind {
    /// An ordinary instance method.
    PlainMethod(CallableDump),
    /// A callable bound to the type itself.
    TypeBoundMethod(CallableDump),
    /// A callable with no implicit receiver.
    StaticMethod(CallableDump),
    /// A lazily-computed attribute, unwrapped to its underlying
    /// zero-argument callable.
    LazyAttribute(CallableDump),
    /// An accessor property with up to three sub-declarations.
    AccessorProperty {
        read: CallableDump,
        write: Option<CallableDump>,
        delete: Option<CallableDump>,
    },
    /// A read-only marker field; emits a placeholder initializer
    /// referencing the marker type.
    ReadOnlyMarker { marker_type: String },
    /// An event channel that matched the caller's allow-list, carrying
    /// the originally declared signature text.
    EventChannel { signature: String },
    /// A plain data field.
    PlainField { declared_type: Option<TypeExpr> },
}

/// A member together with its classification.
#[derive(Debug, Clone)]
pub struct ClassifiedMember {
    /// The member name.
    pub name: String,
    /// The category and its metadata.
    pub kind: MemberKind,
}

/// A field-level construct that permits reads but unconditionally rejects
/// writes.
///
/// The classifier recognizes read-only markers from dump metadata; this
/// guard is the runtime half of the same contract for in-process use.
/// Reads delegate to the shadowed value; every write attempt fails with
/// [`Error::ImmutableField`] naming the field and the owning type.
#[derive(Debug, Clone)]
pub struct ReadOnly<T> {
    value: T,
    field: String,
    owner: String,
}

impl<T> ReadOnly<T> {
    /// Wrap `value` as the read-only field `field` of type `owner`.
    pub fn new(value: T, field: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            value,
            field: field.into(),
            owner: owner.into(),
        }
    }

    /// Read access to the shadowed value.
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Always fails with [`Error::ImmutableField`]; the proposed value is
    /// dropped.
    pub fn try_set(&mut self, _value: T) -> Result<()> {
        Err(Error::ImmutableField {
            field: self.field.clone(),
            owner: self.owner.clone(),
        })
    }
}

impl<T> std::ops::Deref for ReadOnly<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

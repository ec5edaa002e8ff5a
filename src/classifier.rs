//! Member classification.
//!
//! This module walks a dumped type's ordered member set and tags each
//! member with the category the emitter renders it as. Classification is
//! a closed set; member shapes outside it are skipped rather than
//! errored, since a faithful reconstruction from partial runtime
//! metadata is not always possible. Generation is deliberately
//! best-effort at this layer.

use tracing::debug;

use crate::types::{Binding, ClassifiedMember, MemberKind, RawMember, TypeDump};

/// Classifies the members of a dumped type, filtering event channels
/// against a caller-supplied allow-list of declared signature strings.
pub struct MemberClassifier<'a> {
    /// Allow-list entries are full declared signatures, e.g.
    /// `"colourChanged(int, Colour)"`. A channel member matches an entry
    /// when its name equals the entry's prefix up to the parameter-list
    /// delimiter.
    channel_allow_list: Option<&'a [String]>,
}

impl<'a> MemberClassifier<'a> {
    /// Creates a classifier. Pass `None` to drop every event channel.
    pub fn new(channel_allow_list: Option<&'a [String]>) -> Self {
        Self { channel_allow_list }
    }

    /// Classify every member of `dump` in enumeration order.
    ///
    /// Structural dunder names are excluded, unmatched event channels and
    /// opaque members are dropped; everything else maps onto exactly one
    /// [`MemberKind`].
    pub fn classify_type(&self, dump: &TypeDump) -> Vec<ClassifiedMember> {
        dump.members
            .iter()
            .filter(|member| !is_structural_name(member.name()))
            .filter_map(|member| self.classify(member))
            .collect()
    }

    /// Classify a single member. `None` means the member does not appear
    /// in the stub (dropped channel, unrecognized shape).
    ///
    /// The arms follow the recognition precedence: lazy attribute,
    /// type-bound/static callable, read-only marker, event channel,
    /// accessor property, plain callable, plain field.
    pub fn classify(&self, member: &RawMember) -> Option<ClassifiedMember> {
        let kind = match member {
            RawMember::Lazy(callable) => {
                // Unwrap to the underlying zero-argument callable; the
                // memoizing wrapper itself contributes only the
                // annotation.
                MemberKind::LazyAttribute(callable.clone())
            }
            RawMember::Callable(callable) => match callable.binding {
                Binding::Type => MemberKind::TypeBoundMethod(callable.clone()),
                Binding::Static => MemberKind::StaticMethod(callable.clone()),
                Binding::Instance | Binding::Free => MemberKind::PlainMethod(callable.clone()),
            },
            RawMember::Field(field) if field.read_only => MemberKind::ReadOnlyMarker {
                marker_type: field
                    .declared_type
                    .as_ref()
                    .map(|t| t.render().to_string())
                    .unwrap_or_else(|| "ReadOnlyDescriptor".to_string()),
            },
            RawMember::Event(event) => {
                let Some(signature) = self.matching_channel(&event.name) else {
                    debug!(channel = %event.name, "event channel not in allow-list, dropped");
                    return None;
                };
                MemberKind::EventChannel {
                    signature: signature.to_string(),
                }
            }
            RawMember::Accessor(accessor) => MemberKind::AccessorProperty {
                read: accessor.read.clone(),
                write: accessor.write.clone(),
                delete: accessor.delete.clone(),
            },
            RawMember::Field(field) => MemberKind::PlainField {
                declared_type: field.declared_type.clone(),
            },
            RawMember::Opaque(opaque) => {
                debug!(
                    member = %opaque.name,
                    repr = opaque.repr.as_deref().unwrap_or("<unknown>"),
                    "skipping unclassifiable member"
                );
                return None;
            }
        };

        Some(ClassifiedMember {
            name: member.name().to_string(),
            kind,
        })
    }

    /// Find the allow-list entry whose name prefix (up to `(`) equals
    /// `name`. Returns the entry's full signature text.
    fn matching_channel(&self, name: &str) -> Option<&str> {
        self.channel_allow_list?
            .iter()
            .map(String::as_str)
            .find(|entry| {
                let prefix = entry.split('(').next().unwrap_or(entry);
                prefix.trim() == name
            })
    }
}

/// Whether a member name is structural (`__…__`) and therefore excluded
/// from enumeration. The constructor is dumped separately.
fn is_structural_name(name: &str) -> bool {
    name.len() > 4 && name.starts_with("__") && name.ends_with("__")
}

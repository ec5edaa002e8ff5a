#![allow(dead_code)]

use stubforge::types::*;

/// Helper: a callable dump with no parameters, defaults, or return type.
pub fn callable(name: &str, binding: Binding) -> CallableDump {
    CallableDump {
        name: name.to_string(),
        binding,
        params: vec![],
        defaults: vec![],
        return_type: None,
    }
}

/// Helper: an unannotated parameter.
pub fn param(name: &str) -> ParamDump {
    ParamDump {
        name: name.to_string(),
        annotation: None,
    }
}

/// Helper: a parameter with a resolved type annotation.
pub fn typed_param(name: &str, annotation: &str) -> ParamDump {
    ParamDump {
        name: name.to_string(),
        annotation: Some(TypeExpr::Resolved(annotation.to_string())),
    }
}

/// Helper: attach a resolved return annotation.
pub fn returning(mut callable: CallableDump, annotation: &str) -> CallableDump {
    callable.return_type = Some(TypeExpr::Resolved(annotation.to_string()));
    callable
}

/// Helper: a type with two bases, a constructor, a type-bound factory,
/// a lazy attribute, and a read-only marker field.
pub fn shape_dump() -> TypeDump {
    TypeDump {
        name: "Shape".to_string(),
        bases: vec!["Base1".to_string(), "Base2".to_string()],
        metaclass: None,
        dataclass: false,
        constructor: Some(callable("__init__", Binding::Instance)),
        members: vec![
            RawMember::Callable(returning(callable("make", Binding::Type), "Widget")),
            RawMember::Lazy(returning(callable("area", Binding::Instance), "float")),
            RawMember::Field(FieldDump {
                name: "id".to_string(),
                declared_type: Some(TypeExpr::Resolved("ReadOnlyDescriptor".to_string())),
                read_only: true,
            }),
        ],
    }
}

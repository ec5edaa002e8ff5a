mod common;

use common::{callable, param, returning, shape_dump, typed_param};
use stubforge::emitter::StubEmitter;
use stubforge::types::*;

fn emit_plain(dump: &TypeDump) -> String {
    StubEmitter::new(None, &[])
        .emit_type(dump)
        .expect("emission should succeed")
}

// ─── Round Trip Scenario ────────────────────────────────────────────────────

#[test]
fn test_round_trip_shape_scenario() {
    let text = emit_plain(&shape_dump());

    let expected = concat!(
        "class Shape(Base1, Base2):\n",
        "\tid: ReadOnlyDescriptor = ReadOnlyDescriptor()\n",
        "\n",
        "\tdef __init__(self): ...\n",
        "\n",
        "\t@classmethod\n",
        "\tdef make(cls) -> Widget: ...\n",
        "\t@cached_property\n",
        "\tdef area(self) -> float: ...",
    );
    assert_eq!(text, expected);
}

#[test]
fn test_stub_generation_is_deterministic() {
    let dump = shape_dump();
    let first = emit_plain(&dump);
    let second = emit_plain(&dump);
    assert_eq!(
        first, second,
        "two generations over an unchanged dump must be byte-identical"
    );
}

// ─── Header Tests ───────────────────────────────────────────────────────────

#[test]
fn test_header_without_bases_has_no_parentheses() {
    let dump = TypeDump {
        name: "Colour".to_string(),
        bases: vec![],
        metaclass: None,
        dataclass: false,
        constructor: None,
        members: vec![],
    };

    let text = emit_plain(&dump);
    assert!(
        text.starts_with("class Colour:\n"),
        "got header: {}",
        text.lines().next().unwrap_or_default()
    );
}

#[test]
fn test_object_base_is_trivial_and_dropped() {
    let dump = TypeDump {
        name: "Colour".to_string(),
        bases: vec!["object".to_string()],
        metaclass: None,
        dataclass: false,
        constructor: None,
        members: vec![],
    };

    let text = emit_plain(&dump);
    assert!(text.starts_with("class Colour:\n"));
}

#[test]
fn test_metaclass_appended_after_bases() {
    let dump = TypeDump {
        name: "Registry".to_string(),
        bases: vec!["Base".to_string()],
        metaclass: Some("Singleton".to_string()),
        dataclass: false,
        constructor: None,
        members: vec![],
    };

    let text = emit_plain(&dump);
    assert!(text.starts_with("class Registry(Base, metaclass=Singleton):\n"));
}

#[test]
fn test_metaclass_alone_is_parenthesized() {
    let dump = TypeDump {
        name: "Registry".to_string(),
        bases: vec![],
        metaclass: Some("Singleton".to_string()),
        dataclass: false,
        constructor: None,
        members: vec![],
    };

    let text = emit_plain(&dump);
    assert!(text.starts_with("class Registry(metaclass=Singleton):\n"));
}

#[test]
fn test_dataclass_annotation_precedes_header() {
    let dump = TypeDump {
        name: "_MessageBoxData".to_string(),
        bases: vec![],
        metaclass: None,
        dataclass: true,
        constructor: None,
        members: vec![],
    };

    let text = emit_plain(&dump);
    assert!(
        text.starts_with("@dataclass\nclass _MessageBoxData:\n"),
        "the plain-data record annotation goes on its own line above the header"
    );
}

#[test]
fn test_empty_type_emits_placeholder_body() {
    let dump = TypeDump {
        name: "Empty".to_string(),
        bases: vec![],
        metaclass: None,
        dataclass: false,
        constructor: None,
        members: vec![],
    };

    assert_eq!(emit_plain(&dump), "class Empty:\n\t...");
}

// ─── Body Section Tests ─────────────────────────────────────────────────────

#[test]
fn test_event_channels_lead_the_body_with_signature_comments() {
    let allow = vec!["colourChanged(int, Colour)".to_string()];
    let extra = vec!["button_id: int".to_string()];
    let dump = TypeDump {
        name: "ColourSelector".to_string(),
        bases: vec!["QDialog".to_string()],
        metaclass: None,
        dataclass: false,
        constructor: None,
        members: vec![
            RawMember::Event(EventDump {
                name: "colourChanged".to_string(),
            }),
            RawMember::Event(EventDump {
                name: "sig_hidden".to_string(),
            }),
            RawMember::Callable(callable("open_selector", Binding::Instance)),
        ],
    };

    let text = StubEmitter::new(Some(&allow), &extra)
        .emit_type(&dump)
        .unwrap();

    let expected = concat!(
        "class ColourSelector(QDialog):\n",
        "\tcolourChanged : EventChannel = ...  # colourChanged(int, Colour)\n",
        "\n",
        "\tbutton_id: int\n",
        "\n",
        "\tdef open_selector(self): ...",
    );
    assert_eq!(
        text, expected,
        "listed channels lead the body, the unlisted one disappears, extras follow verbatim"
    );
}

#[test]
fn test_plain_fields_follow_marker_fields() {
    let dump = TypeDump {
        name: "PathData".to_string(),
        bases: vec![],
        metaclass: None,
        dataclass: false,
        constructor: None,
        members: vec![
            RawMember::Field(FieldDump {
                name: "window_title".to_string(),
                declared_type: Some(TypeExpr::Resolved("str".to_string())),
                read_only: false,
            }),
            RawMember::Field(FieldDump {
                name: "path_id".to_string(),
                declared_type: Some(TypeExpr::Resolved("ReadOnlyDescriptor".to_string())),
                read_only: true,
            }),
            RawMember::Field(FieldDump {
                name: "dialog_type".to_string(),
                declared_type: None,
                read_only: false,
            }),
        ],
    };

    let expected = concat!(
        "class PathData:\n",
        "\tpath_id: ReadOnlyDescriptor = ReadOnlyDescriptor()\n",
        "\twindow_title: str = ...\n",
        "\tdialog_type = ...",
    );
    assert_eq!(emit_plain(&dump), expected);
}

#[test]
fn test_unknown_member_tolerance() {
    let dump = TypeDump {
        name: "Widget".to_string(),
        bases: vec![],
        metaclass: None,
        dataclass: false,
        constructor: None,
        members: vec![
            RawMember::Callable(returning(callable("as_hex", Binding::Instance), "str")),
            RawMember::Opaque(OpaqueDump {
                name: "exotic".to_string(),
                repr: None,
            }),
            RawMember::Lazy(returning(callable("inverse", Binding::Instance), "Colour")),
        ],
    };

    let text = emit_plain(&dump);
    assert!(text.contains("def as_hex(self) -> str: ..."));
    assert!(text.contains("def inverse(self) -> Colour: ..."));
    assert!(
        !text.contains("exotic"),
        "the unrecognized member must vanish without failing generation"
    );
}

#[test]
fn test_accessor_property_group_uses_property_name_throughout() {
    let dump = TypeDump {
        name: "Dialog".to_string(),
        bases: vec![],
        metaclass: None,
        dataclass: false,
        constructor: None,
        members: vec![RawMember::Accessor(AccessorDump {
            name: "label".to_string(),
            read: returning(callable("label", Binding::Instance), "str"),
            write: Some(CallableDump {
                name: "set_label".to_string(),
                binding: Binding::Instance,
                params: vec![typed_param("value", "str")],
                defaults: vec![],
                return_type: None,
            }),
            delete: Some(callable("del_label", Binding::Instance)),
        })],
    };

    let expected = concat!(
        "class Dialog:\n",
        "\t@property\n",
        "\tdef label(self) -> str: ...\n",
        "\t@label.setter\n",
        "\tdef label(self, value: str): ...\n",
        "\t@label.deleter\n",
        "\tdef label(self): ...",
    );
    assert_eq!(
        emit_plain(&dump),
        expected,
        "write/delete declarations take the property's name, not the sub-function's"
    );
}

#[test]
fn test_methods_keep_enumeration_order() {
    let dump = TypeDump {
        name: "Colours".to_string(),
        bases: vec![],
        metaclass: None,
        dataclass: false,
        constructor: None,
        members: vec![
            RawMember::Callable({
                let mut c = returning(callable("index", Binding::Instance), "int");
                c.params = vec![param("name")];
                c
            }),
            RawMember::Callable({
                let mut c = returning(callable("colour_at", Binding::Instance), "Colour");
                c.params = vec![param("idx")];
                c
            }),
        ],
    };

    let text = emit_plain(&dump);
    let index_pos = text.find("def index").unwrap();
    let colour_at_pos = text.find("def colour_at").unwrap();
    assert!(
        index_pos < colour_at_pos,
        "member order must be the dump's enumeration order, never re-sorted"
    );
}

// ─── Function Emission Tests ────────────────────────────────────────────────

#[test]
fn test_free_function_emits_single_line() {
    let mut func = callable("set_widget_theme", Binding::Free);
    func.params = vec![param("widget"), param("theme")];
    func.return_type = Some(TypeExpr::Resolved("None".to_string()));

    let text = StubEmitter::new(None, &[]).emit_function(&func).unwrap();
    assert_eq!(text, "def set_widget_theme(widget, theme) -> None: ...");
}

#[test]
fn test_function_without_return_type_has_no_arrow() {
    let func = callable("init_module", Binding::Free);

    let text = StubEmitter::new(None, &[]).emit_function(&func).unwrap();
    assert_eq!(text, "def init_module(): ...");
}

#[test]
fn test_static_function_gets_wrapping_annotation() {
    let func = callable("blend", Binding::Static);

    let text = StubEmitter::new(None, &[]).emit_function(&func).unwrap();
    assert_eq!(text, "@staticmethod\ndef blend(): ...");
}

#[test]
fn test_bound_method_emitted_standalone_keeps_receiver() {
    let method = callable("refresh", Binding::Instance);

    let text = StubEmitter::new(None, &[]).emit_function(&method).unwrap();
    assert_eq!(text, "def refresh(self): ...");
}

#[test]
fn test_malformed_member_aborts_type_emission() {
    let dump = TypeDump {
        name: "Broken".to_string(),
        bases: vec![],
        metaclass: None,
        dataclass: false,
        constructor: None,
        members: vec![RawMember::Callable(CallableDump {
            name: "bad".to_string(),
            binding: Binding::Instance,
            params: vec![param("only")],
            defaults: vec![
                DefaultValue::Literal("1".to_string()),
                DefaultValue::Literal("2".to_string()),
            ],
            return_type: None,
        })],
    };

    assert!(
        StubEmitter::new(None, &[]).emit_type(&dump).is_err(),
        "a default/parameter mismatch must fail the whole generation, not emit wrong text"
    );
}

mod common;

use common::{callable, param, typed_param};
use stubforge::Error;
use stubforge::signature::{Receiver, parameter_list, return_suffix, signature};
use stubforge::types::{Binding, DefaultValue, TypeExpr};

// ─── Default Matching Tests ─────────────────────────────────────────────────

#[test]
fn test_defaults_match_trailing_parameters_in_declaration_order() {
    let mut func = callable("configure", Binding::Free);
    func.params = vec![param("p1"), param("p2"), param("p3")];
    func.defaults = vec![
        DefaultValue::Literal("1".to_string()),
        DefaultValue::Str("x".to_string()),
    ];

    let rendered = parameter_list(&func, Receiver::None).unwrap();
    assert_eq!(
        rendered, "p1, p2 = 1, p3 = 'x'",
        "defaults belong to the trailing parameters, in declaration order"
    );
}

#[test]
fn test_all_parameters_defaulted() {
    let mut func = callable("reset", Binding::Free);
    func.params = vec![param("a"), param("b")];
    func.defaults = vec![
        DefaultValue::Literal("None".to_string()),
        DefaultValue::Literal("0".to_string()),
    ];

    let rendered = parameter_list(&func, Receiver::None).unwrap();
    assert_eq!(rendered, "a = None, b = 0");
}

#[test]
fn test_string_defaults_are_requoted_and_literals_verbatim() {
    let mut func = callable("open_path", Binding::Free);
    func.params = vec![param("path"), param("mode")];
    func.defaults = vec![
        DefaultValue::Str("C:/".to_string()),
        DefaultValue::Literal("QMessageBox.Icon.NoIcon".to_string()),
    ];

    let rendered = parameter_list(&func, Receiver::None).unwrap();
    assert_eq!(rendered, "path = 'C:/', mode = QMessageBox.Icon.NoIcon");
}

#[test]
fn test_more_defaults_than_parameters_is_fatal() {
    let mut func = callable("broken", Binding::Free);
    func.params = vec![param("only")];
    func.defaults = vec![
        DefaultValue::Literal("1".to_string()),
        DefaultValue::Literal("2".to_string()),
    ];

    let err = parameter_list(&func, Receiver::None).unwrap_err();
    assert!(
        matches!(
            err,
            Error::MalformedSignatureMetadata {
                params: 1,
                defaults: 2,
                ..
            }
        ),
        "a default surplus must abort generation, got: {err}"
    );
}

// ─── Annotation Rendering Tests ─────────────────────────────────────────────

#[test]
fn test_annotated_parameter_with_default() {
    let mut func = callable("resize", Binding::Free);
    func.params = vec![typed_param("width", "int"), typed_param("height", "int")];
    func.defaults = vec![DefaultValue::Literal("20".to_string())];

    let rendered = parameter_list(&func, Receiver::None).unwrap();
    assert_eq!(rendered, "width: int, height: int = 20");
}

#[test]
fn test_deferred_annotation_renders_verbatim() {
    let mut func = callable("merge", Binding::Free);
    func.params = vec![param("src")];
    func.return_type = Some(TypeExpr::Deferred("_MessageBoxData | None".to_string()));

    assert_eq!(return_suffix(&func), " -> _MessageBoxData | None");
}

// ─── Return Type Tests ──────────────────────────────────────────────────────

#[test]
fn test_return_suffix_omitted_without_annotation() {
    let func = callable("fire", Binding::Free);
    assert_eq!(
        return_suffix(&func),
        "",
        "no declared return type means no arrow clause at all"
    );
}

#[test]
fn test_return_suffix_rendered_as_arrow() {
    let mut func = callable("as_hex", Binding::Free);
    func.return_type = Some(TypeExpr::Resolved("str".to_string()));

    assert_eq!(return_suffix(&func), " -> str");
}

// ─── Receiver Tests ─────────────────────────────────────────────────────────

#[test]
fn test_instance_receiver_prepended_outside_default_matching() {
    let mut method = callable("update", Binding::Instance);
    method.params = vec![param("value")];
    method.defaults = vec![DefaultValue::Literal("0".to_string())];

    let rendered = parameter_list(&method, Receiver::Instance).unwrap();
    assert_eq!(
        rendered, "self, value = 0",
        "the receiver must not consume a default"
    );
}

#[test]
fn test_type_receiver_renders_as_cls() {
    let factory = callable("make", Binding::Type);
    let rendered = parameter_list(&factory, Receiver::Type).unwrap();
    assert_eq!(rendered, "cls");
}

#[test]
fn test_full_signature_assembly() {
    let mut method = callable("colour_at", Binding::Instance);
    method.params = vec![typed_param("idx", "int")];
    method.return_type = Some(TypeExpr::Resolved("Colour".to_string()));

    let rendered = signature(&method, Receiver::Instance).unwrap();
    assert_eq!(rendered, "(self, idx: int) -> Colour");
}

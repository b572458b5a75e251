use chart_kit::style::{assign_style, merge_style};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[test]
fn objects_merge_recursively() {
    let base = json!({ "bar": { "fill": "steelblue", "stroke": { "width": 1, "color": "black" } } });
    let overrides = json!({ "bar": { "stroke": { "width": 2 } }, "label": { "fontSize": 12 } });
    assert_eq!(
        assign_style(&base, &overrides),
        json!({
            "bar": { "fill": "steelblue", "stroke": { "width": 2, "color": "black" } },
            "label": { "fontSize": 12 }
        })
    );
}

#[test]
fn arrays_and_primitives_are_replaced() {
    let base = json!({ "palette": ["red", "green", "blue"], "opacity": 0.5 });
    let overrides = json!({ "palette": ["black"], "opacity": 1 });
    assert_eq!(
        assign_style(&base, &overrides),
        json!({ "palette": ["black"], "opacity": 1 })
    );
}

#[test]
fn null_override_keeps_object_base() {
    let base = json!({ "dot": { "r": 3 } });
    assert_eq!(assign_style(&base, &serde_json::Value::Null), base);
    assert_eq!(assign_style(&json!(4), &json!("x")), json!("x"));
}

#[test]
fn inputs_are_left_untouched() {
    let base = json!({ "a": { "b": 1 } });
    let overrides = json!({ "a": { "c": 2 } });
    let _ = assign_style(&base, &overrides);
    assert_eq!(base, json!({ "a": { "b": 1 } }));
    assert_eq!(overrides, json!({ "a": { "c": 2 } }));
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct DotStyle {
    radius: f64,
    fill: String,
    visible: bool,
}

#[test]
fn typed_styles_take_partial_overrides() {
    let base = DotStyle {
        radius: 3.0,
        fill: "#333".to_owned(),
        visible: true,
    };
    let merged = merge_style(&base, &json!({ "radius": 5.0 })).expect("override applies");
    assert_eq!(
        merged,
        DotStyle {
            radius: 5.0,
            ..base.clone()
        }
    );
    assert!(merge_style(&base, &json!({ "radius": "big" })).is_err());
}

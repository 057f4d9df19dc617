use super::*;
use serde_json::json;

fn layer(classes: &[&str], speed: Option<serde_json::Value>) -> LayerDescriptor {
    LayerDescriptor {
        classes: classes.iter().map(|c| (*c).to_owned()).collect(),
        speed,
    }
}

#[test]
fn declared_speed_wins() {
    assert_eq!(layer_speed(&layer(&["layer", "layer-bg"], Some(json!("0.2")))), 0.2);
    assert_eq!(layer_speed(&layer(&["layer"], Some(json!(0.8)))), 0.8);
}

#[test]
fn unusable_declared_speed_falls_back_to_class() {
    assert_eq!(layer_speed(&layer(&["layer", "layer-bg"], Some(json!("slow")))), 0.35);
    assert_eq!(layer_speed(&layer(&["layer", "layer-front"], Some(json!(0)))), 0.6);
}

#[test]
fn class_order_decides_between_known_classes() {
    assert_eq!(layer_speed(&layer(&["layer-bg", "layer-front"], None)), 0.6);
}

#[test]
fn unknown_layer_uses_default() {
    assert_eq!(layer_speed(&layer(&["layer", "layer-sky"], None)), DEFAULT_LAYER_SPEED);
}

#[test]
fn amplitude_is_range_over_speed() {
    let plan = LayerPlan::from_descriptor(&layer(&["layer", "layer-mid"], None));
    assert_eq!(plan.label.as_deref(), Some("mid"));
    assert_eq!(plan.speed, 0.45);
    assert!((plan.amplitude - 40.0).abs() < 1e-9);
}

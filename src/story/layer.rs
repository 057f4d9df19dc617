use crate::foundation::value::as_number;
use crate::story::model::LayerDescriptor;

/// Parallax travel in percent of the layer's height at speed 1.
pub const PARALLAX_RANGE: f64 = 18.0;
/// Speed for layers with no declared speed and no known depth class.
pub const DEFAULT_LAYER_SPEED: f64 = 0.45;

const CLASS_SPEEDS: [(&str, f64); 3] = [
    ("layer-front", 0.6),
    ("layer-mid", 0.45),
    ("layer-bg", 0.35),
];

/// Static parallax parameters of one depth layer.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LayerPlan {
    /// Depth label from the layer's `layer-*` class, if it has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Resolved speed ratio.
    pub speed: f64,
    /// The layer travels from `-amplitude` to `+amplitude` percent across the
    /// section's scroll range.
    pub amplitude: f64,
}

impl LayerPlan {
    /// Plan one layer element.
    pub fn from_descriptor(layer: &LayerDescriptor) -> Self {
        let speed = layer_speed(layer);
        Self {
            label: layer
                .classes
                .iter()
                .find_map(|c| c.strip_prefix("layer-"))
                .map(str::to_owned),
            speed,
            amplitude: PARALLAX_RANGE / speed,
        }
    }
}

/// Declared `data-speed` when it reads as a finite non-zero number, else the
/// speed of the first known depth class, else [`DEFAULT_LAYER_SPEED`].
pub fn layer_speed(layer: &LayerDescriptor) -> f64 {
    if let Some(declared) = layer
        .speed
        .as_ref()
        .and_then(as_number)
        .filter(|s| s.is_finite() && *s != 0.0)
    {
        return declared;
    }
    CLASS_SPEEDS
        .iter()
        .find(|(class, _)| layer.classes.iter().any(|c| c == class))
        .map_or(DEFAULT_LAYER_SPEED, |(_, speed)| *speed)
}

#[cfg(test)]
#[path = "../../tests/unit/story/layer.rs"]
mod tests;

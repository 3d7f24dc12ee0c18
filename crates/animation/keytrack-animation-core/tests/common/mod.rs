#![allow(dead_code)]

use keytrack_animation_core::{
    InterpolationMode, Rect, TextureKey, TrackApplier, TrackRegistration, Value, ValueKind,
};
use once_cell::sync::Lazy;

pub static X: Lazy<TrackRegistration> =
    Lazy::new(|| TrackRegistration::new("X", ValueKind::Single, InterpolationMode::Linear));
pub static OPACITY: Lazy<TrackRegistration> =
    Lazy::new(|| TrackRegistration::new("Opacity", ValueKind::Single, InterpolationMode::Linear));
pub static POSITION: Lazy<TrackRegistration> =
    Lazy::new(|| TrackRegistration::new("Position", ValueKind::Vector2, InterpolationMode::Spline));
pub static TINT: Lazy<TrackRegistration> =
    Lazy::new(|| TrackRegistration::new("Tint", ValueKind::Color, InterpolationMode::Linear));
pub static SPIN: Lazy<TrackRegistration> =
    Lazy::new(|| TrackRegistration::new("Spin", ValueKind::Quaternion, InterpolationMode::Linear));
pub static BOUNDS: Lazy<TrackRegistration> =
    Lazy::new(|| TrackRegistration::new("Bounds", ValueKind::Rectangle, InterpolationMode::Linear));
pub static FRAME: Lazy<TrackRegistration> =
    Lazy::new(|| TrackRegistration::new("Frame", ValueKind::Texture2D, InterpolationMode::None));

/// Bound object used across the integration tests.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Sprite {
    pub x: f32,
    pub opacity: f32,
    pub position: [f32; 2],
    pub tint: [f32; 4],
    pub spin: [f32; 4],
    pub bounds: Rect,
    pub frame: Option<TextureKey>,
    pub updates: usize,
}

#[derive(Default)]
pub struct SpriteApplier;

impl TrackApplier<Sprite> for SpriteApplier {
    fn registrations(&self) -> Vec<TrackRegistration> {
        vec![
            X.clone(),
            OPACITY.clone(),
            POSITION.clone(),
            TINT.clone(),
            SPIN.clone(),
            BOUNDS.clone(),
            FRAME.clone(),
        ]
    }

    fn on_single_update(&mut self, registration: &TrackRegistration, target: &mut Sprite, value: f32) {
        target.updates += 1;
        if registration.id() == X.id() {
            target.x = value;
        } else if registration.id() == OPACITY.id() {
            target.opacity = value;
        }
    }

    fn on_vector2_update(&mut self, registration: &TrackRegistration, target: &mut Sprite, value: [f32; 2]) {
        target.updates += 1;
        if registration.id() == POSITION.id() {
            target.position = value;
        }
    }

    fn on_color_update(&mut self, registration: &TrackRegistration, target: &mut Sprite, value: [f32; 4]) {
        target.updates += 1;
        if registration.id() == TINT.id() {
            target.tint = value;
        }
    }

    fn on_quaternion_update(&mut self, registration: &TrackRegistration, target: &mut Sprite, value: [f32; 4]) {
        target.updates += 1;
        if registration.id() == SPIN.id() {
            target.spin = value;
        }
    }

    fn on_rectangle_update(&mut self, registration: &TrackRegistration, target: &mut Sprite, value: Rect) {
        target.updates += 1;
        if registration.id() == BOUNDS.id() {
            target.bounds = value;
        }
    }

    fn on_texture2d_update(&mut self, registration: &TrackRegistration, target: &mut Sprite, value: &TextureKey) {
        target.updates += 1;
        if registration.id() == FRAME.id() {
            target.frame = Some(value.clone());
        }
    }
}

fn close(a: &[f32], b: &[f32]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() <= 1e-4)
}

/// Compare two values of the same kind with a small float tolerance.
pub fn assert_value_close(actual: &Value, expected: &Value) {
    let ok = match (actual, expected) {
        (Value::Single(a), Value::Single(b)) => close(&[*a], &[*b]),
        (Value::Vector2(a), Value::Vector2(b)) => close(a, b),
        (Value::Vector3(a), Value::Vector3(b)) => close(a, b),
        (Value::Vector4(a), Value::Vector4(b))
        | (Value::Color(a), Value::Color(b))
        | (Value::Quaternion(a), Value::Quaternion(b)) => close(a, b),
        (Value::Rectangle(a), Value::Rectangle(b)) => close(&a.to_array(), &b.to_array()),
        (Value::Texture2D(a), Value::Texture2D(b)) => {
            a.texture == b.texture
                && a.array_index == b.array_index
                && close(&a.region.to_array(), &b.region.to_array())
        }
        _ => false,
    };
    assert!(ok, "expected {expected:?}, got {actual:?}");
}

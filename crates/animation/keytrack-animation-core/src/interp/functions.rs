//! Interpolation helpers:
//! - step_value (hold previous)
//! - linear_value (component-wise, quaternion NLERP, texture region only)
//! - quaternion NLERP with shortest-arc normalization
//! - cubic Hermite basis used by the spline curve

use crate::value::{Rect, TextureKey, Value};

/// Linear interpolation of scalars.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn lerp_vec2(a: [f32; 2], b: [f32; 2], t: f32) -> [f32; 2] {
    [lerp_f32(a[0], b[0], t), lerp_f32(a[1], b[1], t)]
}

#[inline]
pub fn lerp_vec3(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [
        lerp_f32(a[0], b[0], t),
        lerp_f32(a[1], b[1], t),
        lerp_f32(a[2], b[2], t),
    ]
}

#[inline]
pub fn lerp_vec4(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
    [
        lerp_f32(a[0], b[0], t),
        lerp_f32(a[1], b[1], t),
        lerp_f32(a[2], b[2], t),
        lerp_f32(a[3], b[3], t),
    ]
}

#[inline]
pub fn lerp_rect(a: Rect, b: Rect, t: f32) -> Rect {
    Rect::from_array(lerp_vec4(a.to_array(), b.to_array(), t))
}

#[inline]
fn dot4(a: [f32; 4], b: [f32; 4]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2] + a[3] * b[3]
}

#[inline]
pub(crate) fn normalize4(mut q: [f32; 4]) -> [f32; 4] {
    let len2 = dot4(q, q);
    if len2 > 0.0 {
        let inv_len = len2.sqrt().recip();
        q[0] *= inv_len;
        q[1] *= inv_len;
        q[2] *= inv_len;
        q[3] *= inv_len;
    }
    q
}

/// Quaternion NLERP with shortest-arc correction.
/// If dot < 0, negate the second quaternion to ensure the shortest path.
/// Returns a normalized quaternion (x,y,z,w).
#[inline]
pub fn nlerp_quat(a: [f32; 4], mut b: [f32; 4], t: f32) -> [f32; 4] {
    if dot4(a, b) < 0.0 {
        b = [-b[0], -b[1], -b[2], -b[3]];
    }
    normalize4(lerp_vec4(a, b, t))
}

/// Texture keys never blend the texture itself: the handle comes from `a`,
/// only the region and array slice move toward `b`.
pub fn lerp_texture(a: &TextureKey, b: &TextureKey, t: f32) -> TextureKey {
    let index = lerp_f32(a.array_index as f32, b.array_index as f32, t).round();
    TextureKey {
        texture: a.texture.clone(),
        region: lerp_rect(a.region, b.region, t),
        array_index: index as i32,
    }
}

/// Step interpolation: choose left value.
#[inline]
pub fn step_value(a: &Value) -> Value {
    a.clone()
}

/// Linear interpolation across Value kinds.
pub fn linear_value(a: &Value, b: &Value, t: f32) -> Value {
    match (a, b) {
        (Value::Single(va), Value::Single(vb)) => Value::Single(lerp_f32(*va, *vb, t)),
        (Value::Vector2(va), Value::Vector2(vb)) => Value::Vector2(lerp_vec2(*va, *vb, t)),
        (Value::Vector3(va), Value::Vector3(vb)) => Value::Vector3(lerp_vec3(*va, *vb, t)),
        (Value::Vector4(va), Value::Vector4(vb)) => Value::Vector4(lerp_vec4(*va, *vb, t)),
        (Value::Rectangle(ra), Value::Rectangle(rb)) => Value::Rectangle(lerp_rect(*ra, *rb, t)),
        (Value::Color(ca), Value::Color(cb)) => Value::Color(lerp_vec4(*ca, *cb, t)),
        (Value::Quaternion(qa), Value::Quaternion(qb)) => {
            Value::Quaternion(nlerp_quat(*qa, *qb, t))
        }
        (Value::Texture2D(ta), Value::Texture2D(tb)) => Value::Texture2D(lerp_texture(ta, tb, t)),
        // Fallback: if types mismatch, prefer left (fail-soft).
        _ => a.clone(),
    }
}

// Hermite basis functions
#[inline]
fn hermite_h00(t: f32) -> f32 {
    2.0 * t * t * t - 3.0 * t * t + 1.0
}
#[inline]
fn hermite_h10(t: f32) -> f32 {
    t * t * t - 2.0 * t * t + t
}
#[inline]
fn hermite_h01(t: f32) -> f32 {
    -2.0 * t * t * t + 3.0 * t * t
}
#[inline]
fn hermite_h11(t: f32) -> f32 {
    t * t * t - t * t
}

/// Cubic Hermite segment between `p0` (t = 0) and `p1` (t = 1) with tangents
/// `m0`, `m1`, evaluated per lane.
#[inline]
pub fn hermite4(p0: [f32; 4], p1: [f32; 4], m0: [f32; 4], m1: [f32; 4], t: f32) -> [f32; 4] {
    let (h00, h10, h01, h11) = (hermite_h00(t), hermite_h10(t), hermite_h01(t), hermite_h11(t));
    std::array::from_fn(|i| p0[i] * h00 + m0[i] * h10 + p1[i] * h01 + m1[i] * h11)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::TextureRef;
    use approx::assert_relative_eq;

    #[test]
    fn linear_scalar_midpoint_is_exact() {
        let v = linear_value(&Value::Single(0.0), &Value::Single(10.0), 0.5);
        assert_eq!(v, Value::Single(5.0));
    }

    #[test]
    fn nlerp_takes_shortest_arc_and_normalizes() {
        let a = [0.0, 0.0, 0.0, 1.0];
        let b = [0.0, 0.0, 0.0, -1.0];
        let q = nlerp_quat(a, b, 0.5);
        assert_relative_eq!(q[3], 1.0, epsilon = 1e-6);
        let len = (q[0] * q[0] + q[1] * q[1] + q[2] * q[2] + q[3] * q[3]).sqrt();
        assert_relative_eq!(len, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn texture_lerp_keeps_left_handle() {
        let a = TextureKey::new(
            Some(TextureRef::new("atlas_a")),
            Rect::new(0.0, 0.0, 10.0, 10.0),
            0,
        );
        let b = TextureKey::new(
            Some(TextureRef::new("atlas_b")),
            Rect::new(10.0, 0.0, 20.0, 10.0),
            2,
        );
        let mid = lerp_texture(&a, &b, 0.5);
        assert_eq!(mid.texture, Some(TextureRef::new("atlas_a")));
        assert_eq!(mid.region, Rect::new(5.0, 0.0, 15.0, 10.0));
        assert_eq!(mid.array_index, 1);
    }

    #[test]
    fn hermite_hits_endpoints() {
        let p0 = [1.0, 2.0, 3.0, 4.0];
        let p1 = [5.0, 6.0, 7.0, 8.0];
        let m = [3.0, -1.0, 0.5, 2.0];
        assert_eq!(hermite4(p0, p1, m, m, 0.0), p0);
        assert_eq!(hermite4(p0, p1, m, m, 1.0), p1);
    }
}

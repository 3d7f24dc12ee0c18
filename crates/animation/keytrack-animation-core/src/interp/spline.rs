//! Catmull-Rom control-point curve for spline tracks.
//!
//! One control point per keyframe, stored as four lanes. Tangents are derived
//! from neighbouring points in index space; evaluation runs a cubic Hermite
//! segment starting at the previous keyframe's ordinal.

use crate::interp::functions::{hermite4, normalize4};
use crate::keyframe::KeyFrame;
use crate::value::{Value, ValueKind};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SplineCurve {
    points: Vec<[f32; 4]>,
    tangents: Vec<[f32; 4]>,
}

#[inline]
fn sub4(a: [f32; 4], b: [f32; 4]) -> [f32; 4] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2], a[3] - b[3]]
}

#[inline]
fn half4(a: [f32; 4]) -> [f32; 4] {
    [a[0] * 0.5, a[1] * 0.5, a[2] * 0.5, a[3] * 0.5]
}

impl SplineCurve {
    /// Build the curve for a sorted keyframe list of `kind`.
    ///
    /// Quaternion control points are sign-aligned with their predecessor so
    /// the curve never takes the long way around.
    pub fn from_keyframes(kind: ValueKind, keys: &[KeyFrame]) -> Self {
        let mut points: Vec<[f32; 4]> = Vec::with_capacity(keys.len());
        for key in keys {
            let Some(mut p) = key.value.lanes() else {
                continue;
            };
            if kind == ValueKind::Quaternion {
                if let Some(prev) = points.last() {
                    let d = prev[0] * p[0] + prev[1] * p[1] + prev[2] * p[2] + prev[3] * p[3];
                    if d < 0.0 {
                        p = [-p[0], -p[1], -p[2], -p[3]];
                    }
                }
            }
            points.push(p);
        }
        let mut curve = Self {
            points,
            tangents: Vec::new(),
        };
        curve.update_tangents();
        curve
    }

    /// Recompute every tangent from the current control points. O(n).
    pub fn update_tangents(&mut self) {
        let n = self.points.len();
        self.tangents.clear();
        self.tangents.resize(n, [0.0; 4]);
        if n < 2 {
            return;
        }
        let p = &self.points;
        self.tangents[0] = half4(sub4(p[1], p[0]));
        self.tangents[n - 1] = half4(sub4(p[n - 1], p[n - 2]));
        for i in 1..n - 1 {
            self.tangents[i] = half4(sub4(p[i + 1], p[i - 1]));
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Evaluate the segment starting at control point `index` with local `t` in [0,1].
    pub fn evaluate(&self, index: usize, t: f32) -> Option<[f32; 4]> {
        let p0 = *self.points.get(index)?;
        let Some(&p1) = self.points.get(index + 1) else {
            return Some(p0);
        };
        let t = t.clamp(0.0, 1.0);
        Some(hermite4(p0, p1, self.tangents[index], self.tangents[index + 1], t))
    }

    /// Evaluate and rebuild a typed value.
    pub fn evaluate_value(&self, kind: ValueKind, index: usize, t: f32) -> Option<Value> {
        let mut lanes = self.evaluate(index, t)?;
        if kind == ValueKind::Quaternion {
            lanes = normalize4(lanes);
        }
        Value::from_lanes(kind, lanes)
    }
}

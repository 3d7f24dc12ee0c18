//! Value kinds and typed values carried by keyframes.
//!
//! The set is closed: every interpolator and every dispatch hook matches
//! exhaustively on [`Value`], so adding a kind is a compile-time visible change.

use serde::{Deserialize, Serialize};

use crate::interp::InterpolationMode;

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Single,
    Vector2,
    Vector3,
    Vector4,
    Rectangle,
    Color,
    Quaternion,
    Texture2D,
}

impl ValueKind {
    /// Whether tracks of this kind can be evaluated with `mode`.
    ///
    /// Step and linear work everywhere (texture tracks only blend their region).
    /// Spline is limited to the vector-like kinds that have a control-point curve.
    #[inline]
    pub fn supports(self, mode: InterpolationMode) -> bool {
        match mode {
            InterpolationMode::None | InterpolationMode::Linear => true,
            InterpolationMode::Spline => matches!(
                self,
                ValueKind::Single
                    | ValueKind::Vector2
                    | ValueKind::Vector3
                    | ValueKind::Vector4
                    | ValueKind::Quaternion
            ),
        }
    }

    /// Modes this kind accepts, most expressive last.
    pub fn supported_modes(self) -> &'static [InterpolationMode] {
        const ALL: &[InterpolationMode] = &[
            InterpolationMode::None,
            InterpolationMode::Linear,
            InterpolationMode::Spline,
        ];
        const NO_SPLINE: &[InterpolationMode] =
            &[InterpolationMode::None, InterpolationMode::Linear];
        if self.supports(InterpolationMode::Spline) {
            ALL
        } else {
            NO_SPLINE
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Single => "single",
            ValueKind::Vector2 => "vector2",
            ValueKind::Vector3 => "vector3",
            ValueKind::Vector4 => "vector4",
            ValueKind::Rectangle => "rectangle",
            ValueKind::Color => "color",
            ValueKind::Quaternion => "quaternion",
            ValueKind::Texture2D => "texture2d",
        }
    }
}

/// Axis-aligned rectangle (position + size).
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.x, self.y, self.width, self.height]
    }

    #[inline]
    pub fn from_array(a: [f32; 4]) -> Self {
        Self::new(a[0], a[1], a[2], a[3])
    }
}

/// Opaque handle to a host texture. The core only stores and hands it back.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TextureRef(pub String);

impl TextureRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

/// Texture keyframe payload: which texture, which sub-region, which array slice.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct TextureKey {
    #[serde(default)]
    pub texture: Option<TextureRef>,
    pub region: Rect,
    #[serde(default)]
    pub array_index: i32,
}

impl TextureKey {
    pub fn new(texture: Option<TextureRef>, region: Rect, array_index: i32) -> Self {
        Self {
            texture,
            region,
            array_index,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data")]
pub enum Value {
    Single(f32),
    Vector2([f32; 2]),
    Vector3([f32; 3]),
    Vector4([f32; 4]),
    Rectangle(Rect),
    /// RGBA color
    Color([f32; 4]),
    /// Quaternion (x, y, z, w)
    Quaternion([f32; 4]),
    Texture2D(TextureKey),
}

impl Value {
    #[inline]
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Single(_) => ValueKind::Single,
            Value::Vector2(_) => ValueKind::Vector2,
            Value::Vector3(_) => ValueKind::Vector3,
            Value::Vector4(_) => ValueKind::Vector4,
            Value::Rectangle(_) => ValueKind::Rectangle,
            Value::Color(_) => ValueKind::Color,
            Value::Quaternion(_) => ValueKind::Quaternion,
            Value::Texture2D(_) => ValueKind::Texture2D,
        }
    }

    /// Numeric lanes of this value padded to four, used by the spline curve.
    /// Texture values have no curve representation.
    pub(crate) fn lanes(&self) -> Option<[f32; 4]> {
        match self {
            Value::Single(v) => Some([*v, 0.0, 0.0, 0.0]),
            Value::Vector2(v) => Some([v[0], v[1], 0.0, 0.0]),
            Value::Vector3(v) => Some([v[0], v[1], v[2], 0.0]),
            Value::Vector4(v) | Value::Color(v) | Value::Quaternion(v) => Some(*v),
            Value::Rectangle(r) => Some(r.to_array()),
            Value::Texture2D(_) => None,
        }
    }

    /// Rebuild a value of `kind` from four lanes (inverse of [`Value::lanes`]).
    pub(crate) fn from_lanes(kind: ValueKind, l: [f32; 4]) -> Option<Value> {
        Some(match kind {
            ValueKind::Single => Value::Single(l[0]),
            ValueKind::Vector2 => Value::Vector2([l[0], l[1]]),
            ValueKind::Vector3 => Value::Vector3([l[0], l[1], l[2]]),
            ValueKind::Vector4 => Value::Vector4(l),
            ValueKind::Rectangle => Value::Rectangle(Rect::from_array(l)),
            ValueKind::Color => Value::Color(l),
            ValueKind::Quaternion => Value::Quaternion(l),
            ValueKind::Texture2D => return None,
        })
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Single(v)
    }
}

impl From<[f32; 2]> for Value {
    fn from(v: [f32; 2]) -> Self {
        Value::Vector2(v)
    }
}

impl From<[f32; 3]> for Value {
    fn from(v: [f32; 3]) -> Self {
        Value::Vector3(v)
    }
}

impl From<Rect> for Value {
    fn from(r: Rect) -> Self {
        Value::Rectangle(r)
    }
}

impl From<TextureKey> for Value {
    fn from(t: TextureKey) -> Self {
        Value::Texture2D(t)
    }
}

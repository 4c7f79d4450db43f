//! Program handles, typed uniform values and the fixed-function render states
//! that are switched between draws.

use crate::math::prelude::{Color, Matrix3, Matrix4, Vector2, Vector3, Vector4};

impl_handle!(ShaderHandle);

/// Specify whether front- or back-facing polygons can be culled.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CullFace {
    Nothing,
    Front,
    Back,
}

/// A pixel-wise comparison function.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Comparison {
    Never,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
    Equal,
    NotEqual,
    Always,
}

/// Specifies how incoming RGBA values (source) and the RGBA in framebuffer (destination)
/// are combined.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Equation {
    /// Adds source and destination. Source and destination are multiplied
    /// by blending parameters before addition.
    Add,
    /// Subtracts destination from source.
    Subtract,
    /// Subtracts source from destination.
    ReverseSubtract,
}

/// Blend values.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum BlendValue {
    SourceColor,
    SourceAlpha,
    DestinationColor,
    DestinationAlpha,
}

/// Blend factors.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum BlendFactor {
    Zero,
    One,
    Value(BlendValue),
    OneMinusValue(BlendValue),
}

/// The action taken on the stored stencil value.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum StencilOp {
    Keep,
    Zero,
    Replace,
    Increment,
    Decrement,
    Invert,
}

/// Stencil test and write configuration. The `reference` value is compared
/// against the stored value (both masked with `read_mask`) using `func`; the
/// stored value is then updated with the op matching the outcome, restricted
/// to the bits of `write_mask`.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct StencilState {
    pub func: Comparison,
    pub reference: i32,
    pub read_mask: u32,
    pub write_mask: u32,
    /// Ops applied when the stencil test fails, when the depth test fails, and
    /// when both pass.
    pub ops: (StencilOp, StencilOp, StencilOp),
}

impl Default for StencilState {
    fn default() -> Self {
        StencilState {
            func: Comparison::Always,
            reference: 0,
            read_mask: 0xFF,
            write_mask: 0xFF,
            ops: (StencilOp::Keep, StencilOp::Keep, StencilOp::Keep),
        }
    }
}

/// A struct that encapsulate all the necessary render states.
///
/// Depth testing is considered disabled when `depth_test` is `Always` and
/// `depth_write` is false. Stencil testing is disabled when `stencil` is `None`.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct RenderState {
    pub cull_face: CullFace,
    pub depth_test: Comparison,
    pub depth_write: bool,
    pub color_blend: Option<(Equation, BlendFactor, BlendFactor)>,
    pub stencil: Option<StencilState>,
}

impl Default for RenderState {
    fn default() -> Self {
        RenderState {
            cull_face: CullFace::Nothing,
            depth_test: Comparison::Always, // no depth test,
            depth_write: false,             // no depth write,
            color_blend: None,
            stencil: None,
        }
    }
}

impl RenderState {
    /// Returns true if the depth test is enabled for this state.
    #[inline]
    pub fn is_depth_enabled(&self) -> bool {
        self.depth_test != Comparison::Always || self.depth_write
    }

    /// Alpha blending with `SRC_ALPHA, ONE_MINUS_SRC_ALPHA`.
    pub fn alpha_blend() -> Option<(Equation, BlendFactor, BlendFactor)> {
        Some((
            Equation::Add,
            BlendFactor::Value(BlendValue::SourceAlpha),
            BlendFactor::OneMinusValue(BlendValue::SourceAlpha),
        ))
    }
}

/// Uniform variable for video program object. Each matrix based `UniformVariable`
/// is supplied in column major order and is never transposed.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum UniformVariable {
    Bool(bool),
    I32(i32),
    F32(f32),
    Vector2f([f32; 2]),
    Vector3f([f32; 3]),
    Vector4f([f32; 4]),
    Matrix3f([[f32; 3]; 3]),
    Matrix4f([[f32; 4]; 4]),
}

impl From<bool> for UniformVariable {
    fn from(v: bool) -> Self {
        UniformVariable::Bool(v)
    }
}

impl From<i32> for UniformVariable {
    fn from(v: i32) -> Self {
        UniformVariable::I32(v)
    }
}

impl From<f32> for UniformVariable {
    fn from(v: f32) -> Self {
        UniformVariable::F32(v)
    }
}

impl From<Vector2<f32>> for UniformVariable {
    fn from(v: Vector2<f32>) -> Self {
        UniformVariable::Vector2f(*v.as_ref())
    }
}

impl From<Vector3<f32>> for UniformVariable {
    fn from(v: Vector3<f32>) -> Self {
        UniformVariable::Vector3f(*v.as_ref())
    }
}

impl From<Vector4<f32>> for UniformVariable {
    fn from(v: Vector4<f32>) -> Self {
        UniformVariable::Vector4f(*v.as_ref())
    }
}

impl From<Color<f32>> for UniformVariable {
    fn from(v: Color<f32>) -> Self {
        UniformVariable::Vector4f(v.rgba())
    }
}

impl From<Matrix3<f32>> for UniformVariable {
    fn from(v: Matrix3<f32>) -> Self {
        UniformVariable::Matrix3f(*v.as_ref())
    }
}

impl From<Matrix4<f32>> for UniformVariable {
    fn from(v: Matrix4<f32>) -> Self {
        UniformVariable::Matrix4f(*v.as_ref())
    }
}

impl From<[f32; 2]> for UniformVariable {
    fn from(v: [f32; 2]) -> Self {
        UniformVariable::Vector2f(v)
    }
}

impl From<[f32; 3]> for UniformVariable {
    fn from(v: [f32; 3]) -> Self {
        UniformVariable::Vector3f(v)
    }
}

impl From<[f32; 4]> for UniformVariable {
    fn from(v: [f32; 4]) -> Self {
        UniformVariable::Vector4f(v)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn conversions() {
        assert_eq!(UniformVariable::from(true), UniformVariable::Bool(true));
        assert_eq!(
            UniformVariable::from(Vector3::new(1.0f32, 2.0, 3.0)),
            UniformVariable::Vector3f([1.0, 2.0, 3.0])
        );

        let m = Matrix4::<f32>::from_translation(Vector3::new(1.0, 2.0, 3.0));
        match m.into() {
            UniformVariable::Matrix4f(cols) => assert_eq!(cols[3], [1.0, 2.0, 3.0, 1.0]),
            v => panic!("unexpected {:?}", v),
        }

    }

    #[test]
    fn depth_enabled() {
        let mut state = RenderState::default();
        assert!(!state.is_depth_enabled());
        state.depth_test = Comparison::Less;
        assert!(state.is_depth_enabled());
    }
}

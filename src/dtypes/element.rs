use super::{Complex32, Complex64, DType, ElementCast, Scalar};

/// Represents a type storable as the element of an array.
///
/// Implemented for [bool], the eight fixed-width integers, [f32], [f64],
/// [Complex32], [Complex64], and [Scalar] (the object element type).
pub trait Element:
    'static + Copy + Clone + Default + std::fmt::Debug + PartialEq + Send + Sync + std::marker::Unpin
{
    const DTYPE: DType;
    const ZERO: Self;
    const ONE: Self;

    /// Boxes this value into the runtime [Scalar] currency.
    fn to_scalar(self) -> Scalar;

    /// Converts a runtime [Scalar] into this type, or `None` when no
    /// conversion is registered (e.g. a complex scalar into a real type).
    fn from_scalar(s: Scalar) -> Option<Self>;
}

macro_rules! real_element {
    ($(($t:ty, $v:ident, $zero:expr, $one:expr)),* $(,)?) => {$(
        impl Element for $t {
            const DTYPE: DType = DType::$v;
            const ZERO: Self = $zero;
            const ONE: Self = $one;

            #[inline]
            fn to_scalar(self) -> Scalar {
                Scalar::$v(self)
            }

            fn from_scalar(s: Scalar) -> Option<Self> {
                match s {
                    Scalar::Bool(v) => Some(v.cast_elem()),
                    Scalar::U8(v) => Some(v.cast_elem()),
                    Scalar::U16(v) => Some(v.cast_elem()),
                    Scalar::U32(v) => Some(v.cast_elem()),
                    Scalar::U64(v) => Some(v.cast_elem()),
                    Scalar::I8(v) => Some(v.cast_elem()),
                    Scalar::I16(v) => Some(v.cast_elem()),
                    Scalar::I32(v) => Some(v.cast_elem()),
                    Scalar::I64(v) => Some(v.cast_elem()),
                    Scalar::F32(v) => Some(v.cast_elem()),
                    Scalar::F64(v) => Some(v.cast_elem()),
                    Scalar::C64(_) | Scalar::C128(_) => None,
                }
            }
        }
    )*};
}

real_element!(
    (bool, Bool, false, true),
    (u8, U8, 0, 1),
    (u16, U16, 0, 1),
    (u32, U32, 0, 1),
    (u64, U64, 0, 1),
    (i8, I8, 0, 1),
    (i16, I16, 0, 1),
    (i32, I32, 0, 1),
    (i64, I64, 0, 1),
    (f32, F32, 0.0, 1.0),
    (f64, F64, 0.0, 1.0),
);

macro_rules! complex_element {
    ($(($t:ty, $v:ident)),* $(,)?) => {$(
        impl Element for $t {
            const DTYPE: DType = DType::$v;
            const ZERO: Self = <$t>::new(0.0, 0.0);
            const ONE: Self = <$t>::new(1.0, 0.0);

            #[inline]
            fn to_scalar(self) -> Scalar {
                Scalar::$v(self)
            }

            fn from_scalar(s: Scalar) -> Option<Self> {
                match s {
                    Scalar::Bool(v) => Some(v.cast_elem()),
                    Scalar::U8(v) => Some(v.cast_elem()),
                    Scalar::U16(v) => Some(v.cast_elem()),
                    Scalar::U32(v) => Some(v.cast_elem()),
                    Scalar::U64(v) => Some(v.cast_elem()),
                    Scalar::I8(v) => Some(v.cast_elem()),
                    Scalar::I16(v) => Some(v.cast_elem()),
                    Scalar::I32(v) => Some(v.cast_elem()),
                    Scalar::I64(v) => Some(v.cast_elem()),
                    Scalar::F32(v) => Some(v.cast_elem()),
                    Scalar::F64(v) => Some(v.cast_elem()),
                    Scalar::C64(v) => Some(v.cast_elem()),
                    Scalar::C128(v) => Some(v.cast_elem()),
                }
            }
        }
    )*};
}

complex_element!((Complex32, C64), (Complex64, C128));

impl Element for Scalar {
    const DTYPE: DType = DType::Object;
    const ZERO: Self = Scalar::I64(0);
    const ONE: Self = Scalar::I64(1);

    #[inline]
    fn to_scalar(self) -> Scalar {
        self
    }

    #[inline]
    fn from_scalar(s: Scalar) -> Option<Self> {
        Some(s)
    }
}

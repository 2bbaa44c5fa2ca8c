use super::{Complex32, Complex64, DType};

/// A single value of any non-object [DType].
///
/// This is the crate's "arbitrary object" currency: object arrays store
/// `Scalar` directly, and runtime-typed sources are funneled through it when
/// no compile-time conversion applies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    Bool(bool),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    C64(Complex32),
    C128(Complex64),
}

impl Scalar {
    pub fn dtype(&self) -> DType {
        match self {
            Self::Bool(_) => DType::Bool,
            Self::U8(_) => DType::U8,
            Self::U16(_) => DType::U16,
            Self::U32(_) => DType::U32,
            Self::U64(_) => DType::U64,
            Self::I8(_) => DType::I8,
            Self::I16(_) => DType::I16,
            Self::I32(_) => DType::I32,
            Self::I64(_) => DType::I64,
            Self::F32(_) => DType::F32,
            Self::F64(_) => DType::F64,
            Self::C64(_) => DType::C64,
            Self::C128(_) => DType::C128,
        }
    }

    /// Name of the wrapped value's type, used in cast failure messages.
    pub fn type_name(&self) -> &'static str {
        self.dtype().name()
    }
}

impl Default for Scalar {
    fn default() -> Self {
        Self::I64(0)
    }
}

impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::U8(v) => write!(f, "{v}"),
            Self::U16(v) => write!(f, "{v}"),
            Self::U32(v) => write!(f, "{v}"),
            Self::U64(v) => write!(f, "{v}"),
            Self::I8(v) => write!(f, "{v}"),
            Self::I16(v) => write!(f, "{v}"),
            Self::I32(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::F32(v) => write!(f, "{v}"),
            Self::F64(v) => write!(f, "{v}"),
            Self::C64(v) => write!(f, "{v}"),
            Self::C128(v) => write!(f, "{v}"),
        }
    }
}

macro_rules! scalar_from {
    ($(($t:ty, $v:ident)),* $(,)?) => {$(
        impl From<$t> for Scalar {
            fn from(value: $t) -> Self {
                Self::$v(value)
            }
        }
    )*};
}

scalar_from!(
    (bool, Bool),
    (u8, U8),
    (u16, U16),
    (u32, U32),
    (u64, U64),
    (i8, I8),
    (i16, I16),
    (i32, I32),
    (i64, I64),
    (f32, F32),
    (f64, F64),
    (Complex32, C64),
    (Complex64, C128),
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dtype_and_name() {
        assert_eq!(Scalar::from(1.5f32).dtype(), DType::F32);
        assert_eq!(Scalar::from(Complex64::new(0.0, 1.0)).type_name(), "complex128");
        assert_eq!(Scalar::from(false).dtype(), DType::Bool);
    }

    #[test]
    fn test_default_is_integer_zero() {
        assert_eq!(Scalar::default(), Scalar::I64(0));
    }
}

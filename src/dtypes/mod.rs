//! Module for element type related traits and structs. Contains things like
//! [Element], [DType], and the type promotion table.
//!
//! There are two layers here:
//! 1. Compile time: [Element] is implemented for every storable rust type,
//!    and [ElementCast] is the table of registered conversions between them.
//!    A `store` between two concrete element types only compiles if the
//!    conversion is registered.
//! 2. Run time: [DType] tags a [crate::array::DynArray] with its element
//!    type, and [DType::promote] resolves the common type of two arrays the
//!    same way binary operations on the arrays would.

mod cast;
mod element;
mod scalar;

pub use cast::ElementCast;
pub use element::Element;
pub use scalar::Scalar;

pub use num_complex::{Complex32, Complex64};

/// Runtime tag for the element type of an array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    Bool,
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    /// Complex of two f32
    C64,
    /// Complex of two f64
    C128,
    /// Boxed-scalar fallback, the "anything goes" element type.
    Object,
}

/// Rank classes backing the promotion table. Higher kinds absorb lower ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Kind {
    Bool,
    Unsigned,
    Signed,
    Float,
    Complex,
    Object,
}

impl DType {
    /// Name used in error messages and array summaries.
    pub fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::U8 => "uint8",
            Self::U16 => "uint16",
            Self::U32 => "uint32",
            Self::U64 => "uint64",
            Self::I8 => "int8",
            Self::I16 => "int16",
            Self::I32 => "int32",
            Self::I64 => "int64",
            Self::F32 => "float32",
            Self::F64 => "float64",
            Self::C64 => "complex64",
            Self::C128 => "complex128",
            Self::Object => "object",
        }
    }

    /// Size in bytes of one element.
    pub fn size_of(self) -> usize {
        match self {
            Self::Bool | Self::U8 | Self::I8 => 1,
            Self::U16 | Self::I16 => 2,
            Self::U32 | Self::I32 | Self::F32 => 4,
            Self::U64 | Self::I64 | Self::F64 | Self::C64 => 8,
            Self::C128 => 16,
            Self::Object => std::mem::size_of::<Scalar>(),
        }
    }

    pub fn kind(self) -> Kind {
        match self {
            Self::Bool => Kind::Bool,
            Self::U8 | Self::U16 | Self::U32 | Self::U64 => Kind::Unsigned,
            Self::I8 | Self::I16 | Self::I32 | Self::I64 => Kind::Signed,
            Self::F32 | Self::F64 => Kind::Float,
            Self::C64 | Self::C128 => Kind::Complex,
            Self::Object => Kind::Object,
        }
    }

    pub fn is_complex(self) -> bool {
        self.kind() == Kind::Complex
    }

    /// Width in bytes of the float component, if any. Integers do not bump
    /// the precision of a float or complex operand during promotion.
    fn float_width(self) -> usize {
        match self {
            Self::F32 | Self::C64 => 4,
            Self::F64 | Self::C128 => 8,
            _ => 0,
        }
    }

    fn int_width(self) -> usize {
        match self {
            Self::U8 | Self::I8 => 1,
            Self::U16 | Self::I16 => 2,
            Self::U32 | Self::I32 => 4,
            Self::U64 | Self::I64 => 8,
            _ => 0,
        }
    }

    /// Resolves the common element type of two operands (the upcast table).
    ///
    /// Commutative and idempotent. Object absorbs everything, complex wins
    /// over float, float over integer. Float/complex widths take the max of
    /// the float operands only. Mixing signed and unsigned integers promotes
    /// to the signed type of the wider of the two.
    pub fn promote(self, other: DType) -> DType {
        if self == other {
            return self;
        }
        match self.kind().max(other.kind()) {
            Kind::Object => Self::Object,
            Kind::Complex => {
                if self.float_width().max(other.float_width()) <= 4 {
                    Self::C64
                } else {
                    Self::C128
                }
            }
            Kind::Float => {
                if self.float_width().max(other.float_width()) <= 4 {
                    Self::F32
                } else {
                    Self::F64
                }
            }
            Kind::Signed => match self.int_width().max(other.int_width()) {
                1 => Self::I8,
                2 => Self::I16,
                4 => Self::I32,
                _ => Self::I64,
            },
            Kind::Unsigned => match self.int_width().max(other.int_width()) {
                1 => Self::U8,
                2 => Self::U16,
                4 => Self::U32,
                _ => Self::U64,
            },
            Kind::Bool => Self::Bool,
        }
    }
}

impl std::fmt::Display for DType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [DType; 14] = [
        DType::Bool,
        DType::U8,
        DType::U16,
        DType::U32,
        DType::U64,
        DType::I8,
        DType::I16,
        DType::I32,
        DType::I64,
        DType::F32,
        DType::F64,
        DType::C64,
        DType::C128,
        DType::Object,
    ];

    #[test]
    fn test_promote_is_commutative_and_idempotent() {
        for a in ALL {
            assert_eq!(a.promote(a), a);
            for b in ALL {
                assert_eq!(a.promote(b), b.promote(a));
            }
        }
    }

    #[test]
    fn test_promote_integer_table() {
        assert_eq!(DType::I64.promote(DType::I8), DType::I64);
        assert_eq!(DType::U8.promote(DType::U32), DType::U32);
        assert_eq!(DType::U64.promote(DType::I8), DType::I64);
        assert_eq!(DType::U16.promote(DType::I16), DType::I16);
        assert_eq!(DType::Bool.promote(DType::U8), DType::U8);
        assert_eq!(DType::Bool.promote(DType::Bool), DType::Bool);
    }

    #[test]
    fn test_promote_float_and_complex() {
        // integers never bump float precision
        assert_eq!(DType::I64.promote(DType::F32), DType::F32);
        assert_eq!(DType::F32.promote(DType::F64), DType::F64);
        assert_eq!(DType::I32.promote(DType::C64), DType::C64);
        assert_eq!(DType::F64.promote(DType::C64), DType::C128);
        assert_eq!(DType::C64.promote(DType::C128), DType::C128);
    }

    #[test]
    fn test_promote_object_absorbs() {
        for a in ALL {
            assert_eq!(a.promote(DType::Object), DType::Object);
        }
    }

    #[test]
    fn test_names() {
        assert_eq!(DType::F64.name(), "float64");
        assert_eq!(DType::C128.to_string(), "complex128");
        assert_eq!(DType::Object.name(), "object");
    }

    #[test]
    fn test_sizes() {
        assert_eq!(DType::Bool.size_of(), 1);
        assert_eq!(DType::C64.size_of(), 8);
        assert_eq!(DType::C128.size_of(), 16);
    }
}

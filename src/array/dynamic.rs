use super::{NArray, Store};
use crate::dtypes::{Complex32, Complex64, DType, Element, Scalar};
use crate::error::Error;
use crate::shapes::Shape;

/// An array whose element type is chosen at run time.
///
/// `store` between two `DynArray`s dispatches over the (source, destination)
/// dtype pair: registered pairs run the typed cast kernel, unregistered pairs
/// (a complex source and a real destination) fail with [Error::Cast], and the
/// object destination accepts everything.
#[derive(Debug, Clone, PartialEq)]
pub enum DynArray {
    Bool(NArray<bool>),
    U8(NArray<u8>),
    U16(NArray<u16>),
    U32(NArray<u32>),
    U64(NArray<u64>),
    I8(NArray<i8>),
    I16(NArray<i16>),
    I32(NArray<i32>),
    I64(NArray<i64>),
    F32(NArray<f32>),
    F64(NArray<f64>),
    C64(NArray<Complex32>),
    C128(NArray<Complex64>),
    Object(NArray<Scalar>),
}

macro_rules! dispatch {
    ($self:expr, $a:ident => $body:expr) => {
        match $self {
            DynArray::Bool($a) => $body,
            DynArray::U8($a) => $body,
            DynArray::U16($a) => $body,
            DynArray::U32($a) => $body,
            DynArray::U64($a) => $body,
            DynArray::I8($a) => $body,
            DynArray::I16($a) => $body,
            DynArray::I32($a) => $body,
            DynArray::I64($a) => $body,
            DynArray::F32($a) => $body,
            DynArray::F64($a) => $body,
            DynArray::C64($a) => $body,
            DynArray::C128($a) => $body,
            DynArray::Object($a) => $body,
        }
    };
}

impl DynArray {
    pub fn dtype(&self) -> DType {
        dispatch!(self, a => a.dtype())
    }

    pub fn shape(&self) -> &Shape {
        dispatch!(self, a => a.shape())
    }

    pub fn ndim(&self) -> usize {
        self.shape().ndim()
    }

    pub fn num_elements(&self) -> usize {
        self.shape().num_elements()
    }

    pub fn is_empty(&self) -> bool {
        self.num_elements() == 0
    }

    /// Creates a zero-filled array of the given runtime dtype.
    pub fn try_zeros(dtype: DType, shape: impl Into<Shape>) -> Result<Self, Error> {
        let shape = shape.into();
        Ok(match dtype {
            DType::Bool => NArray::<bool>::try_zeros(shape)?.into(),
            DType::U8 => NArray::<u8>::try_zeros(shape)?.into(),
            DType::U16 => NArray::<u16>::try_zeros(shape)?.into(),
            DType::U32 => NArray::<u32>::try_zeros(shape)?.into(),
            DType::U64 => NArray::<u64>::try_zeros(shape)?.into(),
            DType::I8 => NArray::<i8>::try_zeros(shape)?.into(),
            DType::I16 => NArray::<i16>::try_zeros(shape)?.into(),
            DType::I32 => NArray::<i32>::try_zeros(shape)?.into(),
            DType::I64 => NArray::<i64>::try_zeros(shape)?.into(),
            DType::F32 => NArray::<f32>::try_zeros(shape)?.into(),
            DType::F64 => NArray::<f64>::try_zeros(shape)?.into(),
            DType::C64 => NArray::<Complex32>::try_zeros(shape)?.into(),
            DType::C128 => NArray::<Complex64>::try_zeros(shape)?.into(),
            DType::Object => NArray::<Scalar>::try_zeros(shape)?.into(),
        })
    }

    /// Panicking version of [DynArray::try_zeros].
    pub fn zeros(dtype: DType, shape: impl Into<Shape>) -> Self {
        Self::try_zeros(dtype, shape).unwrap()
    }

    /// Returns this array coerced to another dtype (the `coerce_cast` path):
    /// a zero-filled array of the target dtype is allocated and this array is
    /// stored into it.
    pub fn try_cast_to(&self, dtype: DType) -> Result<Self, Error> {
        if dtype == self.dtype() {
            return Ok(self.clone());
        }
        let mut out = Self::try_zeros(dtype, self.shape().clone())?;
        out.try_store(self)?;
        Ok(out)
    }

    /// Panicking version of [DynArray::try_cast_to].
    pub fn cast_to(&self, dtype: DType) -> Self {
        self.try_cast_to(dtype).unwrap()
    }
}

macro_rules! impl_conversions {
    ($(($v:ident, $t:ty)),* $(,)?) => {$(
        impl From<NArray<$t>> for DynArray {
            fn from(a: NArray<$t>) -> Self {
                Self::$v(a)
            }
        }

        impl TryFrom<DynArray> for NArray<$t> {
            type Error = Error;
            fn try_from(a: DynArray) -> Result<Self, Error> {
                match a {
                    DynArray::$v(a) => Ok(a),
                    other => Err(Error::Cast {
                        from: other.dtype().name(),
                        to: <$t as Element>::DTYPE.name(),
                    }),
                }
            }
        }
    )*};
}

impl_conversions!(
    (Bool, bool),
    (U8, u8),
    (U16, u16),
    (U32, u32),
    (U64, u64),
    (I8, i8),
    (I16, i16),
    (I32, i32),
    (I64, i64),
    (F32, f32),
    (F64, f64),
    (C64, Complex32),
    (C128, Complex64),
    (Object, Scalar),
);

// Per-destination dispatch tables, one impl per concrete destination dtype:
// registered source dtypes call the typed kernel, complex sources into real
// destinations are the unregistered pair, and object sources convert per
// element.
macro_rules! impl_store_dyn_real {
    ($($dst:ty),*) => {$(
        impl<'a> Store<&'a DynArray> for NArray<$dst> {
            fn try_store(&mut self, src: &'a DynArray) -> Result<&mut Self, Error> {
                match src {
                    DynArray::Bool(a) => self.try_store(a),
                    DynArray::U8(a) => self.try_store(a),
                    DynArray::U16(a) => self.try_store(a),
                    DynArray::U32(a) => self.try_store(a),
                    DynArray::U64(a) => self.try_store(a),
                    DynArray::I8(a) => self.try_store(a),
                    DynArray::I16(a) => self.try_store(a),
                    DynArray::I32(a) => self.try_store(a),
                    DynArray::I64(a) => self.try_store(a),
                    DynArray::F32(a) => self.try_store(a),
                    DynArray::F64(a) => self.try_store(a),
                    DynArray::C64(_) | DynArray::C128(_) => Err(Error::Cast {
                        from: src.dtype().name(),
                        to: <$dst as Element>::DTYPE.name(),
                    }),
                    DynArray::Object(a) => self.try_store_object(a),
                }
            }
        }
    )*};
}

impl_store_dyn_real!(bool, u8, u16, u32, u64, i8, i16, i32, i64, f32, f64);

macro_rules! impl_store_dyn_complex {
    ($($dst:ty),*) => {$(
        impl<'a> Store<&'a DynArray> for NArray<$dst> {
            fn try_store(&mut self, src: &'a DynArray) -> Result<&mut Self, Error> {
                match src {
                    DynArray::Bool(a) => self.try_store(a),
                    DynArray::U8(a) => self.try_store(a),
                    DynArray::U16(a) => self.try_store(a),
                    DynArray::U32(a) => self.try_store(a),
                    DynArray::U64(a) => self.try_store(a),
                    DynArray::I8(a) => self.try_store(a),
                    DynArray::I16(a) => self.try_store(a),
                    DynArray::I32(a) => self.try_store(a),
                    DynArray::I64(a) => self.try_store(a),
                    DynArray::F32(a) => self.try_store(a),
                    DynArray::F64(a) => self.try_store(a),
                    DynArray::C64(a) => self.try_store(a),
                    DynArray::C128(a) => self.try_store(a),
                    DynArray::Object(a) => self.try_store_object(a),
                }
            }
        }
    )*};
}

impl_store_dyn_complex!(Complex32, Complex64);

// The object destination accepts every source.
impl<'a> Store<&'a DynArray> for NArray<Scalar> {
    fn try_store(&mut self, src: &'a DynArray) -> Result<&mut Self, Error> {
        dispatch!(src, a => { self.try_store(a)?; });
        Ok(self)
    }
}

impl<'a> Store<&'a DynArray> for DynArray {
    fn try_store(&mut self, src: &'a DynArray) -> Result<&mut Self, Error> {
        dispatch!(&mut *self, a => { a.try_store(src)?; });
        Ok(self)
    }
}

impl std::fmt::Display for DynArray {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        dispatch!(self, a => std::fmt::Display::fmt(a, f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::ArrayFrom;

    #[test]
    fn test_registered_runtime_store() {
        let src = DynArray::from(NArray::<f64>::from_vec([3], vec![1.9, -2.9, 3.0]));
        let mut dst = DynArray::zeros(DType::I32, [3]);
        dst.store(&src);
        let dst = NArray::<i32>::try_from(dst).unwrap();
        assert_eq!(dst.as_slice(), &[1, -2, 3]);
    }

    #[test]
    fn test_unregistered_runtime_store_fails() {
        let src = DynArray::from(NArray::<Complex64>::full([2], Complex64::new(1.0, 2.0)));
        let mut dst = DynArray::zeros(DType::F64, [2]);
        let err = dst.try_store(&src).unwrap_err();
        assert_eq!(err.to_string(), "unknown conversion from complex128 to float64");
    }

    #[test]
    fn test_object_destination_accepts_everything() {
        let src = DynArray::from(NArray::<Complex32>::full([2], Complex32::new(0.0, 1.0)));
        let mut dst = DynArray::zeros(DType::Object, [2]);
        dst.store(&src);
        let dst = NArray::<Scalar>::try_from(dst).unwrap();
        assert_eq!(dst.as_slice(), &[Scalar::C64(Complex32::new(0.0, 1.0)); 2]);
    }

    #[test]
    fn test_cast_to_roundtrips_through_object() {
        let a = DynArray::from(NArray::<i16>::from_vec([2], vec![-5, 9]));
        let obj = a.cast_to(DType::Object);
        assert_eq!(obj.dtype(), DType::Object);
        let back = obj.cast_to(DType::I16);
        assert_eq!(NArray::<i16>::try_from(back).unwrap().as_slice(), &[-5, 9]);
    }

    #[test]
    fn test_cast_to_same_dtype_is_cheap_clone() {
        let a = DynArray::from(NArray::<u8>::from_vec([2], vec![1, 2]));
        let b = a.cast_to(DType::U8);
        assert_eq!(a, b);
    }

    #[test]
    fn test_object_source_into_real_checks_values() {
        let mut obj = NArray::<Scalar>::zeros([2]);
        obj.store(&[1.0f32, 2.0][..]);
        let src = DynArray::from(obj);
        let mut dst = DynArray::zeros(DType::U16, [2]);
        dst.store(&src);
        assert_eq!(NArray::<u16>::try_from(dst).unwrap().as_slice(), &[1, 2]);

        let mut obj = NArray::<Scalar>::zeros([1]);
        obj.store(Complex32::new(1.0, 0.5));
        let src = DynArray::from(obj);
        let mut dst = DynArray::zeros(DType::U16, [1]);
        let err = dst.try_store(&src).unwrap_err();
        assert_eq!(err.to_string(), "unknown conversion from complex64 to uint16");
    }

    #[test]
    fn test_store_broadcasts_across_dtypes() {
        let row = DynArray::from(NArray::<bool>::from_data(vec![true, false, true]));
        let mut dst = DynArray::zeros(DType::F32, [2, 3]);
        dst.store(&row);
        let dst = NArray::<f32>::try_from(dst).unwrap();
        assert_eq!(dst.as_slice(), &[1.0, 0.0, 1.0, 1.0, 0.0, 1.0]);
    }
}

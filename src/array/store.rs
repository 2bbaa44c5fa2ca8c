use std::sync::Arc;

use super::NArray;
use crate::dtypes::{Element, ElementCast, Scalar};
use crate::error::Error;
use crate::shapes::{broadcast_strides, NdIndex};

/// Copies values from `Src` into an existing array, coercing element types
/// through the registered-conversion table.
///
/// The source may be:
/// - a scalar value (fills every element),
/// - a flat slice `&[F]` of exactly `num_elements` values,
/// - another [NArray] whose shape broadcasts to the destination's,
/// - a [crate::array::DynArray] (runtime dispatch; unregistered dtype pairs
///   fail with [Error::Cast]).
///
/// ```rust
/// # use numr::prelude::*;
/// let mut a = NArray::<i32>::zeros([2, 2]);
/// a.store(&[1.5f64, 2.5, -3.5, 4.5][..]);
/// assert_eq!(a.as_slice(), &[1, 2, -3, 4]);
/// ```
pub trait Store<Src> {
    /// Fallible store. On success returns `self` for chaining.
    fn try_store(&mut self, src: Src) -> Result<&mut Self, Error>;

    /// Panicking version of [Store::try_store].
    fn store(&mut self, src: Src) -> &mut Self
    where
        Self: Sized,
    {
        self.try_store(src).unwrap()
    }
}

impl<Dst: Element, Src: Element + ElementCast<Dst>> Store<Src> for NArray<Dst> {
    fn try_store(&mut self, src: Src) -> Result<&mut Self, Error> {
        let v = src.cast_elem();
        self.data_mut().fill(v);
        Ok(self)
    }
}

impl<'a, Dst: Element, Src: Element + ElementCast<Dst>> Store<&'a [Src]> for NArray<Dst> {
    fn try_store(&mut self, src: &'a [Src]) -> Result<&mut Self, Error> {
        if src.len() != self.num_elements() {
            return Err(Error::WrongNumElements {
                expected: self.num_elements(),
                found: src.len(),
            });
        }
        for (out, v) in self.data_mut().iter_mut().zip(src.iter()) {
            *out = (*v).cast_elem();
        }
        Ok(self)
    }
}

impl<'a, Dst: Element, Src: Element + ElementCast<Dst>> Store<&'a NArray<Src>> for NArray<Dst> {
    fn try_store(&mut self, src: &'a NArray<Src>) -> Result<&mut Self, Error> {
        let strides = broadcast_strides(src.shape(), src.strides(), self.shape())?;
        let index = NdIndex::new(self.shape(), &strides);
        let src_data = src.data.clone();
        let data = Arc::make_mut(&mut self.data);
        for (out, i) in data.iter_mut().zip(index) {
            *out = src_data[i].cast_elem();
        }
        Ok(self)
    }
}

impl<E: Element> NArray<E> {
    /// Stores one runtime scalar into every element, failing with
    /// [Error::Cast] when no conversion to `E` is registered.
    pub fn try_store_scalar(&mut self, src: Scalar) -> Result<&mut Self, Error> {
        let v = E::from_scalar(src).ok_or(Error::Cast {
            from: src.type_name(),
            to: E::DTYPE.name(),
        })?;
        self.data_mut().fill(v);
        Ok(self)
    }

    /// Stores an object array, converting each scalar at run time. Fails on
    /// the first value with no registered conversion to `E`.
    pub fn try_store_object(&mut self, src: &NArray<Scalar>) -> Result<&mut Self, Error> {
        let strides = broadcast_strides(src.shape(), src.strides(), self.shape())?;
        let index = NdIndex::new(self.shape(), &strides);
        let src_data = src.data.clone();
        let data = Arc::make_mut(&mut self.data);
        for (out, i) in data.iter_mut().zip(index) {
            let v = src_data[i];
            *out = E::from_scalar(v).ok_or(Error::Cast {
                from: v.type_name(),
                to: E::DTYPE.name(),
            })?;
        }
        Ok(self)
    }
}

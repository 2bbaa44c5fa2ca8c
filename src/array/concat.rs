use std::sync::Arc;

use super::{DynArray, NArray};
use crate::dtypes::{DType, Element};
use crate::error::Error;
use crate::shapes::{check_axis, NdIndex, Shape};

impl<E: Element> NArray<E> {
    /// Copies `src` into the region of `self` starting at `start` along
    /// `axis`. `src` must have `self`'s shape with the axis extent replaced.
    pub(crate) fn copy_region_in(&mut self, axis: usize, start: usize, src: &Self) {
        let offset = start * self.strides[axis];
        let index = NdIndex::with_offset(src.shape(), &self.strides, offset);
        let data = Arc::make_mut(&mut self.data);
        for (v, i) in src.as_slice().iter().zip(index) {
            data[i] = *v;
        }
    }

    /// Copies out the `start..start + len` range of `axis` as a new array.
    pub(crate) fn extract_region(&self, axis: usize, start: usize, len: usize) -> Self {
        let shape = self.shape.with_axis(axis, len);
        let offset = start * self.strides[axis];
        let index = NdIndex::with_offset(&shape, &self.strides, offset);
        let data = index.map(|i| self.data[i]).collect();
        Self::from_parts(shape, data)
    }

    /// Joins arrays of the same element type along `axis`.
    ///
    /// Ranks are aligned by prepending size-1 dimensions; all non-axis
    /// extents must match.
    pub fn try_concatenate(arrays: &[Self], axis: isize) -> Result<Self, Error> {
        if arrays.is_empty() {
            return Err(Error::EmptyInput);
        }
        let nd = arrays.iter().map(Self::ndim).max().unwrap_or(1).max(1);
        let axis = check_axis(axis, nd)?;

        let mut aligned = Vec::with_capacity(arrays.len());
        for a in arrays {
            let shape = a.shape().prepend_ones(nd - a.ndim());
            aligned.push(a.try_reshape(shape)?);
        }

        let mut rest: Option<Vec<usize>> = None;
        let mut sum = 0;
        for a in &aligned {
            let mut dims = a.shape().dims().to_vec();
            sum += dims.remove(axis);
            match &rest {
                Some(prev) if *prev != dims => {
                    return Err(Error::ShapeMismatch {
                        expected: aligned[0].shape().clone(),
                        found: a.shape().clone(),
                    });
                }
                Some(_) => {}
                None => rest = Some(dims),
            }
        }

        let mut dims = rest.unwrap_or_default();
        dims.insert(axis, sum);
        let mut out = Self::try_zeros(Shape::new(dims))?;
        let mut offset = 0;
        for a in &aligned {
            out.copy_region_in(axis, offset, a);
            offset += a.shape().dims()[axis];
        }
        Ok(out)
    }

    /// Panicking version of [NArray::try_concatenate].
    pub fn concatenate(arrays: &[Self], axis: isize) -> Self {
        Self::try_concatenate(arrays, axis).unwrap()
    }

    /// Splits `axis` into `sections` equally sized pieces. The axis extent
    /// must divide evenly.
    pub fn try_split(&self, sections: usize, axis: isize) -> Result<Vec<Self>, Error> {
        let axis = check_axis(axis, self.ndim())?;
        let size = self.shape.dims()[axis];
        if sections == 0 || size % sections != 0 {
            return Err(Error::UnevenSplit { size, sections });
        }
        let len = size / sections;
        Ok((0..sections)
            .map(|i| self.extract_region(axis, i * len, len))
            .collect())
    }

    /// Splits `axis` at the given indices, producing `indices.len() + 1`
    /// pieces. Indices past the end yield empty trailing pieces.
    pub fn try_split_at(&self, indices: &[usize], axis: isize) -> Result<Vec<Self>, Error> {
        let axis = check_axis(axis, self.ndim())?;
        let size = self.shape.dims()[axis];
        let mut out = Vec::with_capacity(indices.len() + 1);
        let mut fst = 0;
        for &idx in indices.iter().chain(std::iter::once(&size)) {
            let lst = idx.min(size);
            out.push(self.extract_region(axis, fst.min(lst), lst.saturating_sub(fst)));
            fst = lst;
        }
        Ok(out)
    }

    pub fn vsplit(&self, sections: usize) -> Result<Vec<Self>, Error> {
        self.try_split(sections, 0)
    }

    pub fn hsplit(&self, sections: usize) -> Result<Vec<Self>, Error> {
        self.try_split(sections, 1)
    }

    pub fn dsplit(&self, sections: usize) -> Result<Vec<Self>, Error> {
        self.try_split(sections, 2)
    }
}

fn typed_concatenate<E: Element>(arrays: &[DynArray], axis: isize) -> Result<DynArray, Error>
where
    NArray<E>: TryFrom<DynArray, Error = Error>,
    DynArray: From<NArray<E>>,
{
    let typed: Vec<NArray<E>> = arrays
        .iter()
        .map(|a| NArray::<E>::try_from(a.clone()))
        .collect::<Result<_, _>>()?;
    Ok(NArray::try_concatenate(&typed, axis)?.into())
}

/// Joins runtime-typed arrays along `axis`. The result element type is the
/// promotion over all inputs, and every input is coerced to it before the
/// copy.
///
/// ```rust
/// # use numr::prelude::*;
/// let a = DynArray::from(NArray::<i32>::from_vec([2], vec![1, 2]));
/// let b = DynArray::from(NArray::<f64>::from_vec([2], vec![0.5, 1.5]));
/// let c = try_concatenate(&[a, b], 0).unwrap();
/// assert_eq!(c.dtype(), DType::F64);
/// ```
pub fn try_concatenate(arrays: &[DynArray], axis: isize) -> Result<DynArray, Error> {
    if arrays.is_empty() {
        return Err(Error::EmptyInput);
    }
    let dtype = arrays
        .iter()
        .fold(arrays[0].dtype(), |d, a| d.promote(a.dtype()));
    let cast: Vec<DynArray> = arrays
        .iter()
        .map(|a| a.try_cast_to(dtype))
        .collect::<Result<_, _>>()?;
    match dtype {
        DType::Bool => typed_concatenate::<bool>(&cast, axis),
        DType::U8 => typed_concatenate::<u8>(&cast, axis),
        DType::U16 => typed_concatenate::<u16>(&cast, axis),
        DType::U32 => typed_concatenate::<u32>(&cast, axis),
        DType::U64 => typed_concatenate::<u64>(&cast, axis),
        DType::I8 => typed_concatenate::<i8>(&cast, axis),
        DType::I16 => typed_concatenate::<i16>(&cast, axis),
        DType::I32 => typed_concatenate::<i32>(&cast, axis),
        DType::I64 => typed_concatenate::<i64>(&cast, axis),
        DType::F32 => typed_concatenate::<f32>(&cast, axis),
        DType::F64 => typed_concatenate::<f64>(&cast, axis),
        DType::C64 => typed_concatenate::<crate::dtypes::Complex32>(&cast, axis),
        DType::C128 => typed_concatenate::<crate::dtypes::Complex64>(&cast, axis),
        DType::Object => typed_concatenate::<crate::dtypes::Scalar>(&cast, axis),
    }
}

/// Panicking version of [try_concatenate].
pub fn concatenate(arrays: &[DynArray], axis: isize) -> DynArray {
    try_concatenate(arrays, axis).unwrap()
}

pub fn vstack(arrays: &[DynArray]) -> Result<DynArray, Error> {
    try_concatenate(arrays, 0)
}

pub fn hstack(arrays: &[DynArray]) -> Result<DynArray, Error> {
    try_concatenate(arrays, 1)
}

pub fn dstack(arrays: &[DynArray]) -> Result<DynArray, Error> {
    try_concatenate(arrays, 2)
}

//! The typed array [NArray], the runtime-typed [DynArray], and the store
//! (copy-with-coercion) engine.

mod allocate;
mod concat;
mod dynamic;
mod store;

pub use allocate::ArrayFrom;
pub use concat::{concatenate, dstack, hstack, try_concatenate, vstack};
pub use dynamic::DynArray;
pub use store::Store;

use std::sync::Arc;

use crate::dtypes::{DType, Element};
use crate::error::Error;
use crate::shapes::Shape;

/// An n-dimensional array of `E` values, stored contiguously in row-major
/// order. Cloning is cheap; the data buffer is copy-on-write.
#[derive(Debug, Clone)]
pub struct NArray<E> {
    pub(crate) data: Arc<Vec<E>>,
    pub(crate) shape: Shape,
    pub(crate) strides: Vec<usize>,
}

impl<E: Element> NArray<E> {
    pub fn dtype(&self) -> DType {
        E::DTYPE
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    pub fn ndim(&self) -> usize {
        self.shape.ndim()
    }

    pub fn num_elements(&self) -> usize {
        self.shape.num_elements()
    }

    pub fn is_empty(&self) -> bool {
        self.num_elements() == 0
    }

    pub fn as_slice(&self) -> &[E] {
        self.data.as_slice()
    }

    pub fn as_vec(&self) -> Vec<E> {
        self.data.as_ref().clone()
    }

    /// Mutable access to the data buffer, cloning it if it is shared.
    pub(crate) fn data_mut(&mut self) -> &mut [E] {
        Arc::make_mut(&mut self.data).as_mut_slice()
    }

    pub fn get(&self, index: &[usize]) -> Option<&E> {
        if index.len() != self.ndim() {
            return None;
        }
        let mut i = 0;
        for (k, &idx) in index.iter().enumerate() {
            if idx >= self.shape.dims()[k] {
                return None;
            }
            i += idx * self.strides[k];
        }
        self.data.get(i)
    }

    /// Returns a view of the same data with a new shape of equal element
    /// count.
    pub fn try_reshape(&self, shape: impl Into<Shape>) -> Result<Self, Error> {
        let shape = shape.into();
        if shape.num_elements() != self.num_elements() {
            return Err(Error::WrongNumElements {
                expected: self.num_elements(),
                found: shape.num_elements(),
            });
        }
        let strides = shape.strides();
        Ok(Self {
            data: self.data.clone(),
            shape,
            strides,
        })
    }

    /// Panicking version of [NArray::try_reshape].
    pub fn reshape(&self, shape: impl Into<Shape>) -> Self {
        self.try_reshape(shape).unwrap()
    }

    /// Collapses to a 1-d array of the same elements.
    pub fn flatten(&self) -> Self {
        let numel = self.num_elements();
        self.reshape([numel])
    }
}

fn index_to_i(shape: &Shape, strides: &[usize], index: &[usize]) -> usize {
    assert_eq!(
        index.len(),
        shape.ndim(),
        "Index rank mismatch: index={index:?} shape={shape}"
    );
    for (k, &idx) in index.iter().enumerate() {
        if idx >= shape.dims()[k] {
            panic!("Index out of bounds: index={index:?} shape={shape}");
        }
    }
    index.iter().zip(strides.iter()).map(|(a, b)| a * b).sum()
}

impl<E: Element, const N: usize> std::ops::Index<[usize; N]> for NArray<E> {
    type Output = E;
    #[inline(always)]
    fn index(&self, index: [usize; N]) -> &Self::Output {
        let i = index_to_i(&self.shape, &self.strides, &index);
        &self.data[i]
    }
}

impl<E: Element, const N: usize> std::ops::IndexMut<[usize; N]> for NArray<E> {
    #[inline(always)]
    fn index_mut(&mut self, index: [usize; N]) -> &mut Self::Output {
        let i = index_to_i(&self.shape, &self.strides, index.as_slice());
        &mut Arc::make_mut(&mut self.data)[i]
    }
}

impl<E: Element> PartialEq for NArray<E> {
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape && self.data == other.data
    }
}

fn fmt_nested<E: std::fmt::Debug>(
    f: &mut std::fmt::Formatter<'_>,
    data: &[E],
    dims: &[usize],
    stride: usize,
) -> std::fmt::Result {
    if dims.len() <= 1 {
        write!(f, "[")?;
        for (i, v) in data.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v:?}")?;
        }
        write!(f, "]")
    } else {
        write!(f, "[")?;
        let inner = stride / dims[0].max(1);
        for i in 0..dims[0] {
            if i > 0 {
                write!(f, ", ")?;
            }
            fmt_nested(f, &data[i * inner..(i + 1) * inner], &dims[1..], inner)?;
        }
        write!(f, "]")
    }
}

impl<E: Element> std::fmt::Display for NArray<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NArray<{}> shape={} ", E::DTYPE, self.shape)?;
        fmt_nested(f, self.as_slice(), self.shape.dims(), self.num_elements())
    }
}

//! Runtime shapes, row-major strides, and broadcast resolution.

mod iterate;

pub(crate) use iterate::NdIndex;

use crate::error::Error;

/// The dimension sizes of an array. Displayed as `[d0,d1,...]`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct Shape {
    dims: Vec<usize>,
}

impl Shape {
    pub fn new(dims: Vec<usize>) -> Self {
        Self { dims }
    }

    /// The 0-d shape of a single element.
    pub fn scalar() -> Self {
        Self { dims: Vec::new() }
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    pub fn num_elements(&self) -> usize {
        self.dims.iter().product()
    }

    /// Row-major (C order) strides, in elements.
    pub fn strides(&self) -> Vec<usize> {
        let n = self.dims.len();
        let mut strides = vec![1; n];
        for i in (0..n.saturating_sub(1)).rev() {
            strides[i] = strides[i + 1] * self.dims[i + 1];
        }
        strides
    }

    /// Returns a copy with `extra` leading size-1 dimensions.
    pub(crate) fn prepend_ones(&self, extra: usize) -> Shape {
        let mut dims = vec![1; extra];
        dims.extend_from_slice(&self.dims);
        Shape { dims }
    }

    /// Returns a copy with the extent along `axis` replaced by `size`.
    pub(crate) fn with_axis(&self, axis: usize, size: usize) -> Shape {
        let mut dims = self.dims.clone();
        dims[axis] = size;
        Shape { dims }
    }
}

impl From<Vec<usize>> for Shape {
    fn from(dims: Vec<usize>) -> Self {
        Self { dims }
    }
}

impl From<&[usize]> for Shape {
    fn from(dims: &[usize]) -> Self {
        Self { dims: dims.to_vec() }
    }
}

impl<const N: usize> From<[usize; N]> for Shape {
    fn from(dims: [usize; N]) -> Self {
        Self { dims: dims.to_vec() }
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, d) in self.dims.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{d}")?;
        }
        write!(f, "]")
    }
}

/// Resolves a (possibly negative) axis against `ndim`.
pub fn check_axis(axis: isize, ndim: usize) -> Result<usize, Error> {
    let resolved = if axis < 0 { axis + ndim as isize } else { axis };
    if resolved < 0 || resolved >= ndim as isize {
        return Err(Error::AxisOutOfRange { axis, ndim });
    }
    Ok(resolved as usize)
}

/// Computes the strides a source array uses when iterated with the
/// destination's shape.
///
/// Dimensions are aligned at the trailing end; size-1 source dimensions (and
/// missing leading ones) broadcast with stride 0. A source with more
/// dimensions than the destination, or with a non-matching non-1 extent,
/// is a shape mismatch.
pub(crate) fn broadcast_strides(
    src: &Shape,
    src_strides: &[usize],
    dst: &Shape,
) -> Result<Vec<usize>, Error> {
    let (sn, dn) = (src.ndim(), dst.ndim());
    if sn > dn {
        return Err(Error::ShapeMismatch {
            expected: dst.clone(),
            found: src.clone(),
        });
    }
    let mut out = vec![0; dn];
    for k in 0..sn {
        let (si, di) = (sn - 1 - k, dn - 1 - k);
        let (sd, dd) = (src.dims()[si], dst.dims()[di]);
        if sd == dd {
            out[di] = src_strides[si];
        } else if sd == 1 {
            out[di] = 0;
        } else {
            return Err(Error::ShapeMismatch {
                expected: dst.clone(),
                found: src.clone(),
            });
        }
    }
    Ok(out)
}

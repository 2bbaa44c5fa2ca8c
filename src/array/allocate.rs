use std::sync::Arc;

use super::NArray;
use crate::dtypes::Element;
use crate::error::Error;
use crate::shapes::Shape;

#[inline]
pub(crate) fn try_alloc_elem<E: Element>(numel: usize, elem: E) -> Result<Vec<E>, Error> {
    let mut data: Vec<E> = Vec::new();
    data.try_reserve(numel).map_err(|_| Error::OutOfMemory)?;
    data.resize(numel, elem);
    Ok(data)
}

impl<E: Element> NArray<E> {
    pub(crate) fn from_parts(shape: Shape, data: Vec<E>) -> Self {
        let strides = shape.strides();
        Self {
            data: Arc::new(data),
            shape,
            strides,
        }
    }

    /// Creates an array filled with `E::ZERO`.
    pub fn zeros(shape: impl Into<Shape>) -> Self {
        Self::try_zeros(shape).unwrap()
    }

    /// Fallible version of [NArray::zeros].
    pub fn try_zeros(shape: impl Into<Shape>) -> Result<Self, Error> {
        Self::try_full(shape, E::ZERO)
    }

    /// Creates an array filled with `E::ONE`.
    pub fn ones(shape: impl Into<Shape>) -> Self {
        Self::try_ones(shape).unwrap()
    }

    /// Fallible version of [NArray::ones].
    pub fn try_ones(shape: impl Into<Shape>) -> Result<Self, Error> {
        Self::try_full(shape, E::ONE)
    }

    /// Creates an array filled with `elem`.
    pub fn full(shape: impl Into<Shape>, elem: E) -> Self {
        Self::try_full(shape, elem).unwrap()
    }

    /// Fallible version of [NArray::full].
    pub fn try_full(shape: impl Into<Shape>, elem: E) -> Result<Self, Error> {
        let shape = shape.into();
        let data = try_alloc_elem(shape.num_elements(), elem)?;
        Ok(Self::from_parts(shape, data))
    }

    /// Takes ownership of `data` as the elements of a `shape`d array.
    /// Fails with [Error::WrongNumElements] when the length does not match.
    pub fn try_from_vec(shape: impl Into<Shape>, data: Vec<E>) -> Result<Self, Error> {
        let shape = shape.into();
        if data.len() != shape.num_elements() {
            return Err(Error::WrongNumElements {
                expected: shape.num_elements(),
                found: data.len(),
            });
        }
        Ok(Self::from_parts(shape, data))
    }

    /// Panicking version of [NArray::try_from_vec].
    pub fn from_vec(shape: impl Into<Shape>, data: Vec<E>) -> Self {
        Self::try_from_vec(shape, data).unwrap()
    }

    /// Creates an array by calling `f` with every multi-dimensional index in
    /// row-major order.
    pub fn from_fn(shape: impl Into<Shape>, mut f: impl FnMut(&[usize]) -> E) -> Self {
        let shape = shape.into();
        let numel = shape.num_elements();
        let mut data = Vec::with_capacity(numel);
        let mut index = vec![0; shape.ndim()];
        for _ in 0..numel {
            data.push(f(&index));
            for k in (0..shape.ndim()).rev() {
                index[k] += 1;
                if index[k] < shape.dims()[k] {
                    break;
                }
                index[k] = 0;
            }
        }
        Self::from_parts(shape, data)
    }

    /// Creates an array counting up from zero in row-major order, cast into
    /// `E`.
    pub fn seq(shape: impl Into<Shape>) -> Self
    where
        u64: crate::dtypes::ElementCast<E>,
    {
        use crate::dtypes::ElementCast;
        let shape = shape.into();
        let data = (0..shape.num_elements() as u64)
            .map(|i| i.cast_elem())
            .collect();
        Self::from_parts(shape, data)
    }
}

/// Construct arrays from (nested) `Vec`s of elements, inferring the shape.
pub trait ArrayFrom<Src>: Sized {
    fn try_from_data(src: Src) -> Result<Self, Error>;

    fn from_data(src: Src) -> Self {
        Self::try_from_data(src).unwrap()
    }
}

impl<E: Element> ArrayFrom<Vec<E>> for NArray<E> {
    fn try_from_data(src: Vec<E>) -> Result<Self, Error> {
        let len = src.len();
        Self::try_from_vec([len], src)
    }
}

impl<E: Element> ArrayFrom<Vec<Vec<E>>> for NArray<E> {
    fn try_from_data(src: Vec<Vec<E>>) -> Result<Self, Error> {
        let rows = src.len();
        let cols = src.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows * cols);
        for row in &src {
            if row.len() != cols {
                return Err(Error::WrongNumElements {
                    expected: cols,
                    found: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Self::try_from_vec([rows, cols], data)
    }
}

impl<E: Element> ArrayFrom<Vec<Vec<Vec<E>>>> for NArray<E> {
    fn try_from_data(src: Vec<Vec<Vec<E>>>) -> Result<Self, Error> {
        let d0 = src.len();
        let d1 = src.first().map_or(0, Vec::len);
        let d2 = src.first().and_then(|p| p.first()).map_or(0, Vec::len);
        let mut data = Vec::with_capacity(d0 * d1 * d2);
        for plane in &src {
            if plane.len() != d1 {
                return Err(Error::WrongNumElements {
                    expected: d1,
                    found: plane.len(),
                });
            }
            for row in plane {
                if row.len() != d2 {
                    return Err(Error::WrongNumElements {
                        expected: d2,
                        found: row.len(),
                    });
                }
                data.extend_from_slice(row);
            }
        }
        Self::try_from_vec([d0, d1, d2], data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeros_ones_full() {
        let z = NArray::<f64>::zeros([2, 3]);
        assert_eq!(z.as_slice(), &[0.0; 6]);
        let o = NArray::<i16>::ones([3]);
        assert_eq!(o.as_slice(), &[1, 1, 1]);
        let f = NArray::<u8>::full([2], 7);
        assert_eq!(f.as_slice(), &[7, 7]);
    }

    #[test]
    fn test_from_vec_length_check() {
        assert!(NArray::<i32>::try_from_vec([2, 2], vec![1, 2, 3]).is_err());
        let a = NArray::<i32>::from_vec([2, 2], vec![1, 2, 3, 4]);
        assert_eq!(a[[1, 0]], 3);
    }

    #[test]
    fn test_from_fn_and_seq() {
        let a = NArray::<i64>::from_fn([2, 2], |idx| (idx[0] + idx[1]) as i64);
        assert_eq!(a.as_slice(), &[0, 1, 1, 2]);
        let s = NArray::<f32>::seq([4]);
        assert_eq!(s.as_slice(), &[0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_nested_construction() {
        let a = NArray::from_data(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        assert_eq!(a.shape().dims(), &[2, 2]);
        assert_eq!(a[[1, 1]], 4.0);

        let ragged: Vec<Vec<f64>> = vec![vec![1.0], vec![2.0, 3.0]];
        assert!(NArray::<f64>::try_from_data(ragged).is_err());

        let b = NArray::from_data(vec![vec![vec![1u8, 2]], vec![vec![3, 4]]]);
        assert_eq!(b.shape().dims(), &[2, 1, 2]);
    }
}

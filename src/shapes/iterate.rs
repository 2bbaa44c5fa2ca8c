use super::Shape;

/// Strided cursor yielding linear offsets into an array's data buffer, in
/// row-major order of the iteration shape. Has a fast path when the strides
/// are the natural contiguous strides of the shape.
#[derive(Debug, Eq, PartialEq)]
pub(crate) struct NdIndex {
    indices: Vec<usize>,
    shape: Vec<usize>,
    strides: Vec<usize>,
    next: Option<usize>,
    contiguous: Option<usize>,
}

impl NdIndex {
    pub(crate) fn new(shape: &Shape, strides: &[usize]) -> Self {
        Self::with_offset(shape, strides, 0)
    }

    pub(crate) fn with_offset(shape: &Shape, strides: &[usize], offset: usize) -> Self {
        let numel = shape.num_elements();
        let contiguous =
            (offset == 0 && strides == shape.strides().as_slice()).then_some(numel);
        Self {
            indices: vec![0; shape.ndim()],
            shape: shape.dims().to_vec(),
            strides: strides.to_vec(),
            next: (numel > 0).then_some(offset),
            contiguous,
        }
    }

    fn next_strided(&mut self) -> Option<usize> {
        let i = self.next.as_mut()?;
        let idx = *i;
        if self.shape.is_empty() {
            self.next = None;
            return Some(idx);
        }
        let mut dim = self.shape.len() - 1;
        loop {
            self.indices[dim] += 1;
            *i += self.strides[dim];

            if self.indices[dim] < self.shape[dim] {
                break;
            }

            *i -= self.shape[dim] * self.strides[dim];
            self.indices[dim] = 0;

            if dim == 0 {
                self.next = None;
                break;
            }

            dim -= 1;
        }
        Some(idx)
    }
}

impl Iterator for NdIndex {
    type Item = usize;

    #[inline(always)]
    fn next(&mut self) -> Option<usize> {
        match self.contiguous {
            Some(numel) => {
                let i = self.next.as_mut()?;
                let idx = *i;
                if idx + 1 >= numel {
                    self.next = None;
                } else {
                    *i += 1;
                }
                Some(idx)
            }
            None => self.next_strided(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contiguous_iteration() {
        let shape = Shape::from([2, 3]);
        let strides = shape.strides();
        let idx: Vec<usize> = NdIndex::new(&shape, &strides).collect();
        assert_eq!(idx, [0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_broadcast_strides_iteration() {
        // a [3] row broadcast over a [2, 3] destination
        let shape = Shape::from([2, 3]);
        let idx: Vec<usize> = NdIndex::new(&shape, &[0, 1]).collect();
        assert_eq!(idx, [0, 1, 2, 0, 1, 2]);
    }

    #[test]
    fn test_offset_region_iteration() {
        // the second column of a [2, 3] buffer
        let shape = Shape::from([2, 1]);
        let idx: Vec<usize> = NdIndex::with_offset(&shape, &[3, 1], 1).collect();
        assert_eq!(idx, [1, 4]);
    }

    #[test]
    fn test_scalar_shape_yields_once() {
        let idx: Vec<usize> = NdIndex::new(&Shape::scalar(), &[]).collect();
        assert_eq!(idx, [0]);
    }

    #[test]
    fn test_empty_shape_yields_nothing() {
        let shape = Shape::from([2, 0]);
        let strides = shape.strides();
        assert_eq!(NdIndex::new(&shape, &strides).count(), 0);
    }
}

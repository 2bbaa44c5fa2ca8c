//! # numr
//!
//! numr is a runtime-dtyped n-dimensional array library built around a
//! casting & coercion engine: arrays of different element types can be
//! stored into each other, with the conversion resolved either at compile
//! time (typed arrays) or at run time (dynamic arrays).
//!
//! The following sections provide the high level concepts; there is more
//! detailed documentation in each of numr's submodules.
//!
//! # Elements & arrays
//!
//! *See [dtypes] and [array] for more information.*
//!
//! An [`array::NArray<E>`] is an n-dimensional array of one of the [Element]
//! types: `bool`, the fixed-width integers, `f32`/`f64`, [`Complex32`]/
//! [`Complex64`], or [`Scalar`] (the "object" element, which can hold a value
//! of any of the others). An [`array::DynArray`] wraps an `NArray` of any of
//! these, tagged with its [`DType`] at run time:
//!
//! ```rust
//! use numr::prelude::*;
//!
//! let a = NArray::<f64>::from_vec([2, 2], vec![1.0, 2.0, 3.0, 4.0]);
//! assert_eq!(a.dtype(), DType::F64);
//! assert_eq!(a[[1, 0]], 3.0);
//!
//! let d = DynArray::from(a);
//! assert_eq!(d.shape().dims(), &[2, 2]);
//! ```
//!
//! # Storing with coercion
//!
//! *See [array::Store] for more information.*
//!
//! `store` copies values from a source into an existing array, casting
//! element types through the registered conversion table and broadcasting
//! the source shape to the destination shape:
//!
//! ```rust
//! use numr::prelude::*;
//!
//! let mut a = NArray::<i32>::zeros([2, 3]);
//! let row = NArray::<f64>::from_vec([3], vec![1.9, 2.9, 3.9]);
//! a.store(&row); // broadcast and truncate
//! assert_eq!(a.as_slice(), &[1, 2, 3, 1, 2, 3]);
//! ```
//!
//! Between typed arrays, an unregistered conversion (such as complex into
//! real) does not compile. Between dynamic arrays the same check happens at
//! run time and fails with a descriptive error:
//!
//! ```rust
//! use numr::prelude::*;
//!
//! let src = DynArray::from(NArray::<Complex64>::ones([2]));
//! let mut dst = DynArray::zeros(DType::F64, [2]);
//! let err = dst.try_store(&src).unwrap_err();
//! assert_eq!(err.to_string(), "unknown conversion from complex128 to float64");
//! ```
//!
//! The `object` dtype is the fallback that accepts every source:
//!
//! ```rust
//! use numr::prelude::*;
//!
//! let src = DynArray::from(NArray::<Complex64>::ones([2]));
//! let mut any = DynArray::zeros(DType::Object, [2]);
//! any.store(&src);
//! ```
//!
//! # Promotion
//!
//! [`DType::promote`] resolves the common dtype of two operands; operations
//! over many arrays, like [`array::try_concatenate`], use it to pick their
//! result type and coerce every input to it.
//!
//! # Interchange
//!
//! The [numpy] module saves and loads arrays in the `.npy` format, and
//! [random] provides seeded random fills.

pub mod array;
pub mod dtypes;
pub mod numpy;
pub mod random;
pub mod shapes;

mod error;

pub use error::Error;

pub mod prelude {
    pub use crate::array::{
        concatenate, dstack, hstack, try_concatenate, vstack, ArrayFrom, DynArray, NArray, Store,
    };
    pub use crate::dtypes::{
        Complex32, Complex64, DType, Element, ElementCast, Kind, Scalar,
    };
    pub use crate::error::Error;
    pub use crate::random::Generator;
    pub use crate::shapes::{check_axis, Shape};
}

pub use dtypes::{Complex32, Complex64, DType, Element, Scalar};

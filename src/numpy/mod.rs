//! Save and load arrays in the `.npy` format.
//!
//! [save] writes a [crate::array::DynArray] (or typed [crate::array::NArray])
//! as NPY v1.0 with a little-endian payload. [load] reads one back, picking
//! the element type from the header's `descr` field; [load_into] additionally
//! coerces the result into an existing array through the store engine, so a
//! file of `float64` can be loaded straight into an `int32` array.
//!
//! Object arrays have no stable byte representation and are rejected on save.

mod load;
mod save;

pub use load::{load, load_into, read, read_into, ReadError};
pub use save::{save, write, write_typed, WriteError};

use std::io;

use crate::dtypes::{Complex32, Complex64, DType, Element};

pub(crate) const MAGIC: [u8; 6] = *b"\x93NUMPY";
pub(crate) const VERSION: [u8; 2] = [1, 0];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Big,
    Little,
    Native,
}

/// An element type with a `.npy` byte representation. Not implemented for
/// [crate::dtypes::Scalar].
pub trait NpyElement: Element {
    /// The header `descr` written for this type, e.g. `<f8`.
    const DESCR: &'static str;

    fn write_le<W: io::Write>(self, w: &mut W) -> io::Result<()>;
    fn read_endian<R: io::Read>(r: &mut R, endian: Endian) -> io::Result<Self>;
}

macro_rules! npy_number {
    ($(($t:ty, $descr:expr)),* $(,)?) => {$(
        impl NpyElement for $t {
            const DESCR: &'static str = $descr;

            fn write_le<W: io::Write>(self, w: &mut W) -> io::Result<()> {
                w.write_all(&self.to_le_bytes())
            }

            fn read_endian<R: io::Read>(r: &mut R, endian: Endian) -> io::Result<Self> {
                let mut buf = [0u8; std::mem::size_of::<$t>()];
                r.read_exact(&mut buf)?;
                Ok(match endian {
                    Endian::Big => <$t>::from_be_bytes(buf),
                    Endian::Little | Endian::Native => <$t>::from_le_bytes(buf),
                })
            }
        }
    )*};
}

npy_number!(
    (u8, "|u1"),
    (u16, "<u2"),
    (u32, "<u4"),
    (u64, "<u8"),
    (i8, "|i1"),
    (i16, "<i2"),
    (i32, "<i4"),
    (i64, "<i8"),
    (f32, "<f4"),
    (f64, "<f8"),
);

impl NpyElement for bool {
    const DESCR: &'static str = "|b1";

    fn write_le<W: io::Write>(self, w: &mut W) -> io::Result<()> {
        w.write_all(&[self as u8])
    }

    fn read_endian<R: io::Read>(r: &mut R, _endian: Endian) -> io::Result<Self> {
        let mut buf = [0u8; 1];
        r.read_exact(&mut buf)?;
        Ok(buf[0] != 0)
    }
}

macro_rules! npy_complex {
    ($(($t:ty, $f:ty, $descr:expr)),* $(,)?) => {$(
        impl NpyElement for $t {
            const DESCR: &'static str = $descr;

            fn write_le<W: io::Write>(self, w: &mut W) -> io::Result<()> {
                self.re.write_le(w)?;
                self.im.write_le(w)
            }

            fn read_endian<R: io::Read>(r: &mut R, endian: Endian) -> io::Result<Self> {
                let re = <$f>::read_endian(r, endian)?;
                let im = <$f>::read_endian(r, endian)?;
                Ok(<$t>::new(re, im))
            }
        }
    )*};
}

npy_complex!((Complex32, f32, "<c8"), (Complex64, f64, "<c16"));

/// Maps a header `descr` back to a [DType], tolerating any byte-order
/// character.
pub(crate) fn dtype_of_descr(descr: &str) -> Option<(DType, Endian)> {
    let (endian, rest) = match descr.chars().next()? {
        '>' => (Endian::Big, &descr[1..]),
        '<' => (Endian::Little, &descr[1..]),
        '=' => (Endian::Native, &descr[1..]),
        '|' => (Endian::Native, &descr[1..]),
        _ => (Endian::Native, descr),
    };
    let dtype = match rest {
        "b1" => DType::Bool,
        "u1" => DType::U8,
        "u2" => DType::U16,
        "u4" => DType::U32,
        "u8" => DType::U64,
        "i1" => DType::I8,
        "i2" => DType::I16,
        "i4" => DType::I32,
        "i8" => DType::I64,
        "f4" => DType::F32,
        "f8" => DType::F64,
        "c8" => DType::C64,
        "c16" => DType::C128,
        _ => return None,
    };
    Some((dtype, endian))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::{DynArray, NArray, Store};
    use crate::dtypes::Scalar;
    use std::io::Cursor;

    #[test]
    fn test_descr_mapping() {
        assert_eq!(dtype_of_descr("<f8"), Some((DType::F64, Endian::Little)));
        assert_eq!(dtype_of_descr("|b1"), Some((DType::Bool, Endian::Native)));
        assert_eq!(dtype_of_descr(">i4"), Some((DType::I32, Endian::Big)));
        assert_eq!(dtype_of_descr("<f2"), None);
    }

    #[test]
    fn test_roundtrip_f64() {
        let a = DynArray::from(NArray::<f64>::from_vec([2, 3], vec![0.5; 6]));
        let mut buf = Vec::new();
        write(&mut buf, &a).unwrap();
        let b = read(&mut Cursor::new(buf)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_roundtrip_all_serializable_dtypes() {
        for dtype in [
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
        ] {
            let mut a = DynArray::zeros(dtype, [3]);
            a.store(&DynArray::from(NArray::<u8>::from_vec([3], vec![1, 0, 3])));
            let mut buf = Vec::new();
            write(&mut buf, &a).unwrap();
            let b = read(&mut Cursor::new(buf)).unwrap();
            assert_eq!(a, b, "round trip failed for {dtype}");
        }
    }

    #[test]
    fn test_roundtrip_1d_and_0d_header() {
        let a = DynArray::from(NArray::<i32>::from_vec([4], vec![1, 2, 3, 4]));
        let mut buf = Vec::new();
        write(&mut buf, &a).unwrap();
        assert_eq!(read(&mut Cursor::new(buf)).unwrap(), a);

        let s = DynArray::from(NArray::<f32>::full(crate::shapes::Shape::scalar(), 2.5));
        let mut buf = Vec::new();
        write(&mut buf, &s).unwrap();
        assert_eq!(read(&mut Cursor::new(buf)).unwrap(), s);
    }

    #[test]
    fn test_object_arrays_are_rejected() {
        let a = DynArray::from(NArray::<Scalar>::zeros([2]));
        let mut buf = Vec::new();
        assert!(matches!(
            write(&mut buf, &a),
            Err(WriteError::ObjectNotSerializable)
        ));
    }

    #[test]
    fn test_read_into_casts() {
        let a = DynArray::from(NArray::<f64>::from_vec([2], vec![1.9, -2.0]));
        let mut buf = Vec::new();
        write(&mut buf, &a).unwrap();
        let mut dst = DynArray::zeros(DType::I8, [2]);
        read_into(&mut Cursor::new(buf), &mut dst).unwrap();
        assert_eq!(NArray::<i8>::try_from(dst).unwrap().as_slice(), &[1, -2]);
    }

    #[test]
    fn test_bad_magic() {
        let buf = b"\x92NUMPY\x01\x00".to_vec();
        assert!(matches!(
            read(&mut Cursor::new(buf)),
            Err(ReadError::InvalidMagicNumber(_))
        ));
    }

    #[test]
    fn test_header_is_64_byte_aligned() {
        let a = DynArray::from(NArray::<u8>::zeros([5]));
        let mut buf = Vec::new();
        let n = write(&mut buf, &a).unwrap();
        assert_eq!(n, buf.len());
        // payload starts at a 64 byte boundary
        assert_eq!((buf.len() - 5) % 64, 0);
    }
}

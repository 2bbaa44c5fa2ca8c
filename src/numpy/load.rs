use std::{fs::File, io, io::BufReader, path::Path, str::Utf8Error};

use super::{dtype_of_descr, Endian, NpyElement, MAGIC, VERSION};
use crate::array::{DynArray, NArray, Store};
use crate::dtypes::{Complex32, Complex64, DType};
use crate::shapes::Shape;

/// The errors that can happen while reading a `.npy` file.
#[derive(Debug)]
pub enum ReadError {
    /// Magic number did not match the expected value.
    InvalidMagicNumber([u8; 6]),

    /// Only NPY version 1.0 is supported.
    InvalidVersion([u8; 2]),

    /// Error from opening a file, reading values, etc.
    IoError(io::Error),

    /// Error from converting header bytes to a [String].
    Utf8Error(Utf8Error),

    /// The header dictionary is missing the "descr" key.
    HeaderMissingDescr,

    /// The "descr" value does not name a supported element type.
    HeaderInvalidDescr(String),

    /// The header dictionary is missing the "fortran_order" key.
    HeaderMissingFortranOrder,

    /// Column-major files are not supported.
    FortranOrderNotSupported,

    /// The header dictionary is missing the "shape" key.
    HeaderMissingShape,

    /// The "shape" value is not a tuple of sizes.
    HeaderInvalidShape,

    /// Storing the loaded data into the destination array failed.
    Store(crate::error::Error),
}

impl From<io::Error> for ReadError {
    fn from(e: io::Error) -> Self {
        Self::IoError(e)
    }
}

impl std::fmt::Display for ReadError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl std::error::Error for ReadError {}

/// Loads a `.npy` file, picking the array's element type from the header.
pub fn load<P: AsRef<Path>>(path: P) -> Result<DynArray, ReadError> {
    let mut f = BufReader::new(File::open(path)?);
    read(&mut f)
}

/// Loads a `.npy` file and stores it into `dst`, coercing dtype and
/// broadcasting shape as `store` does.
pub fn load_into<P: AsRef<Path>>(path: P, dst: &mut DynArray) -> Result<(), ReadError> {
    let mut f = BufReader::new(File::open(path)?);
    read_into(&mut f, dst)
}

/// Reads an array in `.npy` format from a [io::Read].
pub fn read<R: io::Read>(r: &mut R) -> Result<DynArray, ReadError> {
    let header = read_header(r)?;
    let (dtype, endian) = dtype_of_descr(&header.descr)
        .ok_or_else(|| ReadError::HeaderInvalidDescr(header.descr.clone()))?;
    let shape = Shape::new(header.shape);
    Ok(match dtype {
        DType::Bool => read_typed::<R, bool>(r, shape, endian)?.into(),
        DType::U8 => read_typed::<R, u8>(r, shape, endian)?.into(),
        DType::U16 => read_typed::<R, u16>(r, shape, endian)?.into(),
        DType::U32 => read_typed::<R, u32>(r, shape, endian)?.into(),
        DType::U64 => read_typed::<R, u64>(r, shape, endian)?.into(),
        DType::I8 => read_typed::<R, i8>(r, shape, endian)?.into(),
        DType::I16 => read_typed::<R, i16>(r, shape, endian)?.into(),
        DType::I32 => read_typed::<R, i32>(r, shape, endian)?.into(),
        DType::I64 => read_typed::<R, i64>(r, shape, endian)?.into(),
        DType::F32 => read_typed::<R, f32>(r, shape, endian)?.into(),
        DType::F64 => read_typed::<R, f64>(r, shape, endian)?.into(),
        DType::C64 => read_typed::<R, Complex32>(r, shape, endian)?.into(),
        DType::C128 => read_typed::<R, Complex64>(r, shape, endian)?.into(),
        DType::Object => unreachable!("no descr maps to the object dtype"),
    })
}

/// Reads an array and stores it into `dst`, coercing via the store engine.
pub fn read_into<R: io::Read>(r: &mut R, dst: &mut DynArray) -> Result<(), ReadError> {
    let src = read(r)?;
    dst.try_store(&src).map_err(ReadError::Store)?;
    Ok(())
}

fn read_typed<R: io::Read, E: NpyElement>(
    r: &mut R,
    shape: Shape,
    endian: Endian,
) -> Result<NArray<E>, ReadError> {
    let numel = shape.num_elements();
    let mut data = Vec::with_capacity(numel);
    for _ in 0..numel {
        data.push(E::read_endian(r, endian)?);
    }
    Ok(NArray::from_parts(shape, data))
}

struct Header {
    descr: String,
    shape: Vec<usize>,
}

fn read_header<R: io::Read>(r: &mut R) -> Result<Header, ReadError> {
    let mut magic = [0u8; 6];
    r.read_exact(&mut magic)?;
    if magic != MAGIC {
        return Err(ReadError::InvalidMagicNumber(magic));
    }

    let mut version = [0u8; 2];
    r.read_exact(&mut version)?;
    if version != VERSION {
        return Err(ReadError::InvalidVersion(version));
    }

    let mut len = [0u8; 2];
    r.read_exact(&mut len)?;
    let mut buf = vec![0u8; u16::from_le_bytes(len) as usize];
    r.read_exact(&mut buf)?;
    let header = std::str::from_utf8(&buf).map_err(ReadError::Utf8Error)?;

    let descr = quoted_value(header, "'descr'").ok_or(ReadError::HeaderMissingDescr)?;

    let order = value_after(header, "'fortran_order'").ok_or(ReadError::HeaderMissingFortranOrder)?;
    if order.starts_with("True") {
        return Err(ReadError::FortranOrderNotSupported);
    }

    let shape = value_after(header, "'shape'").ok_or(ReadError::HeaderMissingShape)?;
    let inner = shape
        .strip_prefix('(')
        .and_then(|s| s.split(')').next())
        .ok_or(ReadError::HeaderInvalidShape)?;
    let mut dims = Vec::new();
    for part in inner.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        dims.push(part.parse().map_err(|_| ReadError::HeaderInvalidShape)?);
    }

    Ok(Header {
        descr: descr.to_string(),
        shape: dims,
    })
}

/// The text after `key` and its following `:`.
fn value_after<'a>(header: &'a str, key: &str) -> Option<&'a str> {
    let i = header.find(key)?;
    let rest = header[i + key.len()..].trim_start();
    Some(rest.strip_prefix(':')?.trim_start())
}

/// The quote-delimited string value for `key`.
fn quoted_value<'a>(header: &'a str, key: &str) -> Option<&'a str> {
    let rest = value_after(header, key)?;
    let rest = rest.strip_prefix('\'')?;
    rest.split('\'').next()
}

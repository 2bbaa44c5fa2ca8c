use std::{fs::File, io, path::Path};

use super::{NpyElement, MAGIC, VERSION};
use crate::array::{DynArray, NArray};

#[derive(Debug)]
pub enum WriteError {
    /// Error from creating the file or writing bytes.
    Io(io::Error),

    /// Object arrays have no byte representation.
    ObjectNotSerializable,
}

impl From<io::Error> for WriteError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl std::fmt::Display for WriteError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl std::error::Error for WriteError {}

/// Saves the array to a `.npy` file. Returns the number of bytes written.
///
/// ```no_run
/// # use numr::prelude::*;
/// let arr = DynArray::from(NArray::<f64>::zeros([2, 3]));
/// numr::numpy::save("test.npy", &arr).unwrap();
/// ```
pub fn save<P: AsRef<Path>>(path: P, arr: &DynArray) -> Result<usize, WriteError> {
    let mut f = File::create(path)?;
    write(&mut f, arr)
}

/// Writes the array in `.npy` format to a [io::Write].
pub fn write<W: io::Write>(w: &mut W, arr: &DynArray) -> Result<usize, WriteError> {
    match arr {
        DynArray::Bool(a) => write_typed(w, a),
        DynArray::U8(a) => write_typed(w, a),
        DynArray::U16(a) => write_typed(w, a),
        DynArray::U32(a) => write_typed(w, a),
        DynArray::U64(a) => write_typed(w, a),
        DynArray::I8(a) => write_typed(w, a),
        DynArray::I16(a) => write_typed(w, a),
        DynArray::I32(a) => write_typed(w, a),
        DynArray::I64(a) => write_typed(w, a),
        DynArray::F32(a) => write_typed(w, a),
        DynArray::F64(a) => write_typed(w, a),
        DynArray::C64(a) => write_typed(w, a),
        DynArray::C128(a) => write_typed(w, a),
        DynArray::Object(_) => Err(WriteError::ObjectNotSerializable),
    }
}

/// Writes a typed array in `.npy` format to a [io::Write].
pub fn write_typed<W: io::Write, E: NpyElement>(
    w: &mut W,
    arr: &NArray<E>,
) -> Result<usize, WriteError> {
    let dims = arr.shape().dims();
    let shape_str = dims
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<String>>()
        .join(", ")
        + if dims.len() == 1 { "," } else { "" };

    let mut header = format!(
        "{{'descr': '{}', 'fortran_order': False, 'shape': ({})}}",
        E::DESCR,
        shape_str,
    )
    .into_bytes();

    // pad so the payload starts on a 64 byte boundary
    let preamble = MAGIC.len() + VERSION.len() + 2;
    while (preamble + header.len() + 1) % 64 != 0 {
        header.push(b'\x20');
    }
    header.push(b'\n');

    w.write_all(&MAGIC)?;
    w.write_all(&VERSION)?;
    w.write_all(&(header.len() as u16).to_le_bytes())?;
    w.write_all(&header)?;

    let mut num_bytes = preamble + header.len();
    for &v in arr.as_slice() {
        v.write_le(w)?;
        num_bytes += E::DTYPE.size_of();
    }
    Ok(num_bytes)
}

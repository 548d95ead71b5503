//! Output emission.

pub mod stl;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::debug;

use crate::error::RenderError;
use crate::evaluation::Geometry;

/// Emits the geometry's mesh to `path` as binary STL; a missing path makes
/// emission a no-op (the geometry stays reachable via the container).
pub fn emit(geometry: &Geometry, path: Option<&Path>) -> Result<(), RenderError> {
    match path {
        Some(path) => write_stl(geometry, path),
        None => Ok(()),
    }
}

/// Whole-buffer write: encode, then open/write/flush in one scope.
pub fn write_stl(geometry: &Geometry, path: &Path) -> Result<(), RenderError> {
    let bytes = stl::encode(&geometry.solid);
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(&bytes)?;
    writer.flush()?;
    debug!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

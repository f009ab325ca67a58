use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;
use crate::error::Result;

pub mod csv;

/// Plane coordinates of a labelled sample.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {

    pub label : String,

    pub x : f64,

    pub y : f64

}

/// Destination of a finished projection table. Implementors own the
/// acquisition and release of whatever they write to; the pipeline never
/// calls persist for an empty run.
pub trait Sink {

    fn persist(&mut self, rows : &[ResultRow]) -> Result<()>;

}

/// In-memory sink, holding the rendered table.
impl Sink for Vec<u8> {

    fn persist(&mut self, rows : &[ResultRow]) -> Result<()> {
        csv::write_rows(self, rows)
    }

}

/// Writes the table to a file, created (or truncated) on persist. The
/// file is flushed and closed before persist returns, whether the write
/// succeeded or not.
#[derive(Debug, Clone)]
pub struct FileSink {

    path : PathBuf

}

impl FileSink {

    pub fn new<P>(path : P) -> Self
    where
        P : AsRef<Path>
    {
        Self { path : path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

}

impl Sink for FileSink {

    fn persist(&mut self, rows : &[ResultRow]) -> Result<()> {
        debug!("Writing {} rows to {}", rows.len(), self.path.display());
        let f = File::create(&self.path)?;
        csv::write_rows(&f, rows)?;
        f.sync_all()?;
        Ok(())
    }

}

use nalgebra::*;
use serde::{Serialize, Deserialize};
use crate::error::{Error, Result};

/// A labelled observation: the embedding of a single word (or any other
/// item) as a double precision vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {

    pub label : String,

    pub vector : Vec<f64>

}

impl Sample {

    pub fn new<S>(label : S, vector : Vec<f64>) -> Self
    where
        S : Into<String>
    {
        Self { label : label.into(), vector }
    }

    pub fn dim(&self) -> usize {
        self.vector.len()
    }

}

/// Ordered collection of samples sharing a single vector length.
/// The order in which samples were informed is the order of the rows of
/// every matrix derived from the table, and the order of the final output.
/// An empty table is valid and has dimension zero.
#[derive(Debug, Clone, Default)]
pub struct SampleTable {

    samples : Vec<Sample>,

    dim : usize

}

impl SampleTable {

    /// Assembles a table, verifying that every vector has the length of the
    /// first one. The first offending sample is reported, with the expected
    /// and actual lengths.
    pub fn new(samples : Vec<Sample>) -> Result<Self> {
        let dim = samples.first().map(|s| s.dim() ).unwrap_or(0);
        if let Some(bad) = samples.iter().find(|s| s.dim() != dim ) {
            return Err(Error::DimensionMismatch {
                label : bad.label.clone(),
                expected : dim,
                actual : bad.dim()
            });
        }
        Ok(Self { samples, dim })
    }

    /// Number of samples (n).
    pub fn nrows(&self) -> usize {
        self.samples.len()
    }

    /// Shared vector length (d).
    pub fn ncols(&self) -> usize {
        self.dim
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.nrows(), self.ncols())
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples[..]
    }

    pub fn labels(&self) -> impl Iterator<Item=&str> {
        self.samples.iter().map(|s| &s.label[..] )
    }

    /// Packs the vectors into a n x d matrix, one sample per row.
    pub fn to_matrix(&self) -> DMatrix<f64> {
        DMatrix::from_fn(self.nrows(), self.ncols(), |i, j| self.samples[i].vector[j] )
    }

}

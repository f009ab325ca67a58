use nalgebra::*;
use crate::sample::SampleTable;

/// Sample matrix with the column-wise means subtracted. Every column of
/// `data` sums to zero up to rounding; `means` is kept so callers can map
/// new observations into the same frame.
#[derive(Debug, Clone)]
pub struct Centered {

    pub data : DMatrix<f64>,

    pub means : DVector<f64>

}

impl Centered {

    /// Centers a n x d matrix in place.
    ///
    /// # Panics
    ///
    /// If the matrix has no rows.
    pub fn from_matrix(mut data : DMatrix<f64>) -> Self {
        assert!(data.nrows() > 0, "Centering requires at least one sample");
        let means = DVector::from_iterator(data.ncols(), data.column_iter().map(|c| c.mean() ));
        for (mut col, m) in data.column_iter_mut().zip(means.iter()) {
            col.add_scalar_mut(-*m);
        }
        Self { data, means }
    }

    pub fn nrows(&self) -> usize {
        self.data.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.data.ncols()
    }

}

impl<'a> From<&'a SampleTable> for Centered {

    fn from(tbl : &'a SampleTable) -> Self {
        Self::from_matrix(tbl.to_matrix())
    }

}

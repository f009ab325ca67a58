use nalgebra::*;
use tracing::{debug, info};
use crate::error::Result;
use crate::sample::SampleTable;

mod center;
mod svd;
mod project;

pub use center::Centered;
pub use svd::PrincipalBasis;
pub use project::project;

/// Number of output coordinates of a projection (plane coordinates x and y).
pub const COMPONENTS : usize = 2;

/// Principal component analysis of a sample table: the centered data, its
/// principal basis and the coordinates of each sample along the leading
/// `components` directions.
#[derive(Debug, Clone)]
pub struct Reduction {

    pub centered : Centered,

    pub basis : PrincipalBasis,

    /// n x components matrix, row i holding the coordinates of sample i.
    pub coords : DMatrix<f64>

}

impl Reduction {

    /// Centers, decomposes and projects a non-empty table onto `components`
    /// principal directions. Fails before the decomposition when the table
    /// dimension is smaller than `components`.
    ///
    /// # Panics
    ///
    /// If the table is empty. Callers handle the empty run before fitting.
    pub fn fit(tbl : &SampleTable, components : usize) -> Result<Self> {
        assert!(!tbl.is_empty(), "Cannot reduce an empty table");
        let (n, d) = tbl.shape();
        debug!("Centering {} x {} sample matrix", n, d);
        let centered = Centered::from(tbl);
        let basis = PrincipalBasis::decompose(&centered, components)?;
        let ratio = basis.explained_variance_ratio();
        info!(
            "Leading {} directions explain {:.1}% of the variance",
            components,
            100.0 * ratio.rows(0, components).sum()
        );
        let coords = project(&centered, &basis, components);
        Ok(Self { centered, basis, coords })
    }

}

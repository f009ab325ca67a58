use nalgebra::*;
use nalgebra::linalg::SVD;
use std::cmp::Ordering;
use tracing::debug;
use crate::error::{Error, Result};
use super::center::Centered;

/// Upper bound on implicit-shift iterations before giving up on convergence.
const MAX_ITER : usize = 100_000;

/// Residual norm under which a candidate direction is considered to lie in the
/// span of the directions already accepted.
const SPAN_EPS : f64 = 1E-8;

/// Orthonormal principal directions of a centered sample matrix, arranged as the
/// columns of a d x m matrix and ordered by non-increasing singular value. The
/// sign of each direction is whatever the decomposition produced: it is
/// never normalized, so two runs may disagree on it.
#[derive(Debug, Clone)]
pub struct PrincipalBasis {

    directions : DMatrix<f64>,

    singular_values : DVector<f64>

}

impl PrincipalBasis {

    /// Computes the right-singular vectors of the centered matrix, keeping at least
    /// `components` of them. Fails when the samples have fewer than `components`
    /// dimensions. A zero matrix (identical samples, or a single sample) still yields
    /// an orthonormal basis, with all singular values equal to zero.
    pub fn decompose(centered : &Centered, components : usize) -> Result<Self> {
        let dim = centered.ncols();
        if dim < components {
            return Err(Error::Dimension { dim, components });
        }
        let svd = SVD::try_new(centered.data.clone(), false, true, f64::EPSILON, MAX_ITER)
            .ok_or(Error::Decomposition)?;
        let v_t = svd.v_t.ok_or(Error::Decomposition)?;
        let sv = svd.singular_values;

        // Stable, so equal singular values keep the order the SVD returned them in.
        let mut order : Vec<usize> = (0..sv.nrows()).collect();
        order.sort_by(|a, b| sv[*b].partial_cmp(&sv[*a]).unwrap_or(Ordering::Equal) );

        let mut dirs : Vec<DVector<f64>> = Vec::with_capacity(order.len().max(components));
        let mut values : Vec<f64> = Vec::with_capacity(dirs.capacity());
        for ix in order {
            if let Some(u) = orthogonal_unit(&dirs[..], v_t.row(ix).transpose()) {
                dirs.push(u);
                values.push(sv[ix]);
            }
        }
        let n_found = dirs.len();
        complete_basis(&mut dirs, dim, components);
        values.resize(dirs.len(), 0.0);
        if dirs.len() > n_found {
            debug!("Completed principal basis with {} null directions", dirs.len() - n_found);
        }

        Ok(Self {
            directions : DMatrix::from_columns(&dirs[..]),
            singular_values : DVector::from_vec(values)
        })
    }

    /// Dimension of each direction (d).
    pub fn dim(&self) -> usize {
        self.directions.nrows()
    }

    /// Number of directions available.
    pub fn len(&self) -> usize {
        self.directions.ncols()
    }

    pub fn direction(&self, ix : usize) -> DVectorSlice<'_, f64> {
        self.directions.column(ix)
    }

    /// The first k directions as the columns of a d x k matrix.
    pub fn leading(&self, k : usize) -> DMatrixSlice<'_, f64> {
        self.directions.columns(0, k)
    }

    pub fn singular_values(&self) -> &DVector<f64> {
        &self.singular_values
    }

    /// Share of the total variance carried by each direction (sigma_i^2 / sum sigma_j^2).
    /// All zeros when the centered matrix was zero.
    pub fn explained_variance_ratio(&self) -> DVector<f64> {
        let sq = self.singular_values.map(|s| s * s );
        let total = sq.sum();
        if total > 0.0 {
            sq / total
        } else {
            DVector::zeros(sq.nrows())
        }
    }

}

/// Removes from v its components along the (orthonormal) directions in dirs and
/// normalizes the residual. None if v lies in their span.
fn orthogonal_unit(dirs : &[DVector<f64>], mut v : DVector<f64>) -> Option<DVector<f64>> {
    for u in dirs.iter() {
        let p = u.dot(&v);
        v.axpy(-p, u, 1.0);
    }
    let norm = v.norm();
    if norm > SPAN_EPS {
        Some(v / norm)
    } else {
        None
    }
}

/// Extends an orthonormal set with standard basis vectors (Gram-Schmidt) until it
/// holds `k` directions. Requires k <= dim.
fn complete_basis(dirs : &mut Vec<DVector<f64>>, dim : usize, k : usize) {
    let mut candidate = 0;
    while dirs.len() < k && candidate < dim {
        let mut e = DVector::<f64>::zeros(dim);
        e[candidate] = 1.0;
        candidate += 1;
        if let Some(u) = orthogonal_unit(&dirs[..], e) {
            dirs.push(u);
        }
    }
}

use nalgebra::*;
use super::center::Centered;
use super::svd::PrincipalBasis;

/// Coordinates of every centered sample along the leading k principal directions:
/// a n x k matrix whose row i corresponds to sample i of the source table.
///
/// # Panics
///
/// If the basis holds fewer than k directions, or if its dimension differs
/// from the number of columns of the centered data.
pub fn project(centered : &Centered, basis : &PrincipalBasis, k : usize) -> DMatrix<f64> {
    assert!(k <= basis.len(), "Requested {} components from a basis of {}", k, basis.len());
    assert!(centered.ncols() == basis.dim(), "Data of dimension {} on a basis of dimension {}", centered.ncols(), basis.dim());
    &centered.data * basis.leading(k)
}

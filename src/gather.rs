//! Reindexing between common receiver (COG) and common source (CSG) gathers.
//!
//! A COG is a sequence of R matrices shaped `(D, T)`, one per receiver. A
//! CSG is a sequence of D matrices shaped `(R, T)`, one per source depth.
//! Converting one into the other swaps the outer sequence axis with the
//! first matrix axis and leaves the time axis alone, so the same routine
//! serves both directions.
//!
//! Inputs are borrowed and never modified. Outputs are freshly allocated
//! and owned by the caller. Values are moved around as whole rows with
//! `Clone`, never inspected, so NaN and infinities survive bit for bit.

use rayon::prelude::*;

use crate::config::ReindexConfig;
use crate::error::GatherError;
use crate::math::Array2;

/// Shape shared by every element of a gather sequence.
///
/// Fails with [`GatherError::EmptyInput`] for an empty sequence and with
/// [`GatherError::ShapeMismatch`] at the first element whose shape differs
/// from element 0.
pub fn gather_shape<T>(gather: &[Array2<T>]) -> Result<(usize, usize), GatherError> {
    let first = gather.first().ok_or_else(|| {
        log::debug!("Rejecting empty gather sequence");
        GatherError::EmptyInput
    })?;
    let expected = first.shape();

    if let Some((index, found)) = gather
        .iter()
        .map(Array2::shape)
        .enumerate()
        .find(|&(_, shape)| shape != expected)
    {
        log::debug!(
            "Gather element {} has shape {:?}, expected {:?}",
            index,
            found,
            expected
        );
        return Err(GatherError::ShapeMismatch {
            index,
            expected,
            found,
        });
    }

    Ok(expected)
}

/// Convert a common receiver gather into a common source gather.
///
/// `cog` holds R matrices of shape `(D, T)`; the result holds D matrices of
/// shape `(R, T)` where row `r` of element `s` is a copy of row `s` of
/// `cog[r]`.
///
/// # Errors
///
/// [`GatherError::EmptyInput`] when `cog` is empty,
/// [`GatherError::ShapeMismatch`] when its elements disagree in shape. No
/// output is allocated in either case.
///
/// Elements with zero depths are accepted and give an empty CSG. That empty
/// result no longer records R, so passing it to [`csg_to_cog`] fails with
/// [`GatherError::EmptyInput`]. Use [`CogGather`](crate::layout::CogGather)
/// when a zero-length depth axis has to survive a round trip.
pub fn cog_to_csg<T>(cog: &[Array2<T>]) -> Result<Vec<Array2<T>>, GatherError>
where
    T: Clone + Send + Sync,
{
    cog_to_csg_with_config(cog, &ReindexConfig::default())
}

/// [`cog_to_csg`] with an explicit execution configuration.
pub fn cog_to_csg_with_config<T>(
    cog: &[Array2<T>],
    config: &ReindexConfig,
) -> Result<Vec<Array2<T>>, GatherError>
where
    T: Clone + Send + Sync,
{
    let (n_depths, n_times) = gather_shape(cog)?;
    log::debug!(
        "Reindexing COG of {} receivers x ({}, {}) into CSG",
        cog.len(),
        n_depths,
        n_times
    );
    Ok(swap_outer_axis(cog, n_depths, n_times, config))
}

/// Convert a common source gather into a common receiver gather.
///
/// `csg` holds D matrices of shape `(R, T)`; the result holds R matrices of
/// shape `(D, T)` where row `s` of element `r` is a copy of row `r` of
/// `csg[s]`.
///
/// # Errors
///
/// Same contract as [`cog_to_csg`]. Elements with zero receivers give an
/// empty COG, which [`cog_to_csg`] then rejects with
/// [`GatherError::EmptyInput`]; [`CsgGather`](crate::layout::CsgGather)
/// keeps the depth count instead.
pub fn csg_to_cog<T>(csg: &[Array2<T>]) -> Result<Vec<Array2<T>>, GatherError>
where
    T: Clone + Send + Sync,
{
    csg_to_cog_with_config(csg, &ReindexConfig::default())
}

/// [`csg_to_cog`] with an explicit execution configuration.
pub fn csg_to_cog_with_config<T>(
    csg: &[Array2<T>],
    config: &ReindexConfig,
) -> Result<Vec<Array2<T>>, GatherError>
where
    T: Clone + Send + Sync,
{
    let (n_receivers, n_times) = gather_shape(csg)?;
    log::debug!(
        "Reindexing CSG of {} depths x ({}, {}) into COG",
        csg.len(),
        n_receivers,
        n_times
    );
    Ok(swap_outer_axis(csg, n_receivers, n_times, config))
}

/// Swap the outer sequence axis of `input` with its first matrix axis.
///
/// Every element of `input` must already be known to have shape
/// `(inner, width)`. The result holds `inner` matrices of shape
/// `(input.len(), width)`. `inner` is passed explicitly so that callers
/// holding validated dimensions can reindex an empty `input`.
pub(crate) fn swap_outer_axis<T>(
    input: &[Array2<T>],
    inner: usize,
    width: usize,
    config: &ReindexConfig,
) -> Vec<Array2<T>>
where
    T: Clone + Send + Sync,
{
    let outer = input.len();
    let build = |slot: usize| -> Array2<T> {
        let mut data = Vec::with_capacity(outer * width);
        for matrix in input {
            data.extend_from_slice(matrix.row_slice(slot));
        }
        Array2::from_parts(data, outer, width)
    };

    let parallel = config.use_parallel(outer.saturating_mul(inner).saturating_mul(width));
    log::debug!(
        "Building {} matrices of shape ({}, {}) ({})",
        inner,
        outer,
        width,
        if parallel { "parallel" } else { "sequential" }
    );

    if parallel {
        (0..inner).into_par_iter().map(build).collect()
    } else {
        (0..inner).map(build).collect()
    }
}

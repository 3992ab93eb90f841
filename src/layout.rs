//! Validated gather containers.
//!
//! [`CogGather`] and [`CsgGather`] own their matrices together with the
//! `(receivers, depths, times)` dimensions checked at construction. Because
//! the dimensions are carried alongside the data, converting between the
//! two cannot fail and keeps zero-length axes intact.

use crate::config::ReindexConfig;
use crate::error::GatherError;
use crate::gather::{gather_shape, swap_outer_axis};
use crate::math::Array2;

/// Common receiver gather: one `(depths, times)` matrix per receiver.
#[derive(Clone, Debug, PartialEq)]
pub struct CogGather<T> {
    receivers: Vec<Array2<T>>,
    n_depths: usize,
    n_times: usize,
}

/// Common source gather: one `(receivers, times)` matrix per source depth.
#[derive(Clone, Debug, PartialEq)]
pub struct CsgGather<T> {
    depths: Vec<Array2<T>>,
    n_receivers: usize,
    n_times: usize,
}

impl<T> CogGather<T> {
    /// Validate and wrap a receiver-ordered sequence.
    pub fn new(receivers: Vec<Array2<T>>) -> Result<Self, GatherError> {
        let (n_depths, n_times) = gather_shape(&receivers)?;
        Ok(Self {
            receivers,
            n_depths,
            n_times,
        })
    }

    pub fn n_receivers(&self) -> usize {
        self.receivers.len()
    }

    pub fn n_depths(&self) -> usize {
        self.n_depths
    }

    pub fn n_times(&self) -> usize {
        self.n_times
    }

    /// `(receivers, depths, times)`
    pub fn dims(&self) -> (usize, usize, usize) {
        (self.n_receivers(), self.n_depths, self.n_times)
    }

    pub fn receiver(&self, r: usize) -> Option<&Array2<T>> {
        self.receivers.get(r)
    }

    pub fn get(&self, r: usize, s: usize, t: usize) -> Option<&T> {
        self.receivers.get(r)?.get(s, t)
    }

    pub fn as_slice(&self) -> &[Array2<T>] {
        &self.receivers
    }

    pub fn into_inner(self) -> Vec<Array2<T>> {
        self.receivers
    }
}

impl<T> CogGather<T>
where
    T: Clone + Send + Sync,
{
    pub fn to_csg(&self) -> CsgGather<T> {
        self.to_csg_with_config(&ReindexConfig::default())
    }

    pub fn to_csg_with_config(&self, config: &ReindexConfig) -> CsgGather<T> {
        CsgGather {
            depths: swap_outer_axis(&self.receivers, self.n_depths, self.n_times, config),
            n_receivers: self.n_receivers(),
            n_times: self.n_times,
        }
    }
}

impl<T> CsgGather<T> {
    /// Validate and wrap a depth-ordered sequence.
    pub fn new(depths: Vec<Array2<T>>) -> Result<Self, GatherError> {
        let (n_receivers, n_times) = gather_shape(&depths)?;
        Ok(Self {
            depths,
            n_receivers,
            n_times,
        })
    }

    pub fn n_depths(&self) -> usize {
        self.depths.len()
    }

    pub fn n_receivers(&self) -> usize {
        self.n_receivers
    }

    pub fn n_times(&self) -> usize {
        self.n_times
    }

    /// `(receivers, depths, times)`, in the same order as [`CogGather::dims`].
    pub fn dims(&self) -> (usize, usize, usize) {
        (self.n_receivers, self.n_depths(), self.n_times)
    }

    pub fn depth(&self, s: usize) -> Option<&Array2<T>> {
        self.depths.get(s)
    }

    pub fn get(&self, s: usize, r: usize, t: usize) -> Option<&T> {
        self.depths.get(s)?.get(r, t)
    }

    pub fn as_slice(&self) -> &[Array2<T>] {
        &self.depths
    }

    pub fn into_inner(self) -> Vec<Array2<T>> {
        self.depths
    }
}

impl<T> CsgGather<T>
where
    T: Clone + Send + Sync,
{
    pub fn to_cog(&self) -> CogGather<T> {
        self.to_cog_with_config(&ReindexConfig::default())
    }

    pub fn to_cog_with_config(&self, config: &ReindexConfig) -> CogGather<T> {
        CogGather {
            receivers: swap_outer_axis(&self.depths, self.n_receivers, self.n_times, config),
            n_depths: self.n_depths(),
            n_times: self.n_times,
        }
    }
}

impl<T> TryFrom<Vec<Array2<T>>> for CogGather<T> {
    type Error = GatherError;

    fn try_from(value: Vec<Array2<T>>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<T> TryFrom<Vec<Array2<T>>> for CsgGather<T> {
    type Error = GatherError;

    fn try_from(value: Vec<Array2<T>>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

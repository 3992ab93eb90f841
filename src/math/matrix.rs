use std::error::Error;
use std::fmt;
use std::ops::{Index, IndexMut};
use std::slice::ChunksExact;

use num_traits::Zero;

#[derive(Clone, Debug, PartialEq)]
pub struct Array2<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T> Array2<T> {
    pub fn from_shape_vec(shape: (usize, usize), data: Vec<T>) -> Result<Self, ShapeError> {
        let (rows, cols) = shape;
        if rows.checked_mul(cols) != Some(data.len()) {
            return Err(ShapeError::BufferLength {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self { data, rows, cols })
    }

    pub fn new(rows: usize, cols: usize, data: Vec<T>) -> Result<Self, ShapeError> {
        Self::from_shape_vec((rows, cols), data)
    }

    /// Build a matrix from nested rows. Every row must have the length of
    /// the first one; an empty outer vector gives a `(0, 0)` matrix.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, ShapeError> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, Vec::len);
        let capacity = nrows.checked_mul(ncols).ok_or(ShapeError::BufferLength {
            rows: nrows,
            cols: ncols,
            len: 0,
        })?;
        let mut data = Vec::with_capacity(capacity);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != ncols {
                return Err(ShapeError::RaggedRow {
                    row,
                    expected: ncols,
                    found: values.len(),
                });
            }
            data.extend(values);
        }
        Ok(Self {
            data,
            rows: nrows,
            cols: ncols,
        })
    }

    /// Wrap a buffer whose length is already known to be `rows * cols`.
    pub(crate) fn from_parts(data: Vec<T>, rows: usize, cols: usize) -> Self {
        debug_assert_eq!(data.len(), rows * cols, "buffer length does not match shape");
        Self { data, rows, cols }
    }

    pub fn nrows(&self) -> usize {
        self.rows
    }

    pub fn ncols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Borrow one row. Panics when `row >= nrows()` and the matrix has
    /// columns; a zero-width matrix yields an empty slice for any row.
    pub fn row_slice(&self, row: usize) -> &[T] {
        let start = self.offset(row, 0);
        &self.data[start..start + self.cols]
    }

    pub fn row_slice_mut(&mut self, row: usize) -> &mut [T] {
        let start = self.offset(row, 0);
        let cols = self.cols;
        &mut self.data[start..start + cols]
    }

    /// Iterate over rows in order.
    ///
    /// Zero-width matrices still yield `nrows()` empty rows.
    pub fn rows(&self) -> Rows<'_, T> {
        Rows {
            chunks: if self.cols == 0 {
                None
            } else {
                Some(self.data.chunks_exact(self.cols))
            },
            remaining: self.rows,
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.rows && col < self.cols {
            self.data.get(self.offset(row, col))
        } else {
            None
        }
    }

    pub fn mapv<U, F>(&self, mut f: F) -> Array2<U>
    where
        F: FnMut(&T) -> U,
    {
        Array2 {
            data: self.data.iter().map(|v| f(v)).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.data.clone()
    }

    pub fn into_raw_vec(self) -> Vec<T> {
        self.data
    }

    /// Copy into an `ndarray::Array2` with the same logical layout.
    pub fn to_ndarray(&self) -> ndarray::Array2<T>
    where
        T: Clone,
    {
        ndarray::Array2::from_shape_fn((self.rows, self.cols), |(r, c)| self[(r, c)].clone())
    }
}

impl<T> Array2<T>
where
    T: Clone,
{
    /// Panics when `rows * cols` overflows `usize`.
    pub fn from_elem(shape: (usize, usize), value: T) -> Self {
        let (rows, cols) = shape;
        let len = rows
            .checked_mul(cols)
            .unwrap_or_else(|| panic!("shape ({}, {}) overflows usize", rows, cols));
        Self {
            data: vec![value; len],
            rows,
            cols,
        }
    }
}

impl<T> Array2<T>
where
    T: Clone + Zero,
{
    pub fn zeros(shape: (usize, usize)) -> Self {
        Self::from_elem(shape, T::zero())
    }
}

/// Row iterator returned by [`Array2::rows`].
pub struct Rows<'a, T> {
    chunks: Option<ChunksExact<'a, T>>,
    remaining: usize,
}

impl<'a, T> Iterator for Rows<'a, T> {
    type Item = &'a [T];

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        match self.chunks.as_mut() {
            Some(chunks) => chunks.next(),
            None => Some(&[][..]),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> ExactSizeIterator for Rows<'a, T> {}

impl<T: Clone> From<ndarray::Array2<T>> for Array2<T> {
    fn from(value: ndarray::Array2<T>) -> Self {
        let (rows, cols) = value.dim();
        // `iter` walks in logical order, so Fortran-ordered inputs come out row-major.
        let data = value.iter().cloned().collect();
        Self { data, rows, cols }
    }
}

impl<T> Index<(usize, usize)> for Array2<T> {
    type Output = T;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        assert!(
            index.0 < self.rows && index.1 < self.cols,
            "index ({}, {}) out of bounds for shape ({}, {})",
            index.0,
            index.1,
            self.rows,
            self.cols
        );
        let offset = self.offset(index.0, index.1);
        &self.data[offset]
    }
}

impl<T> IndexMut<(usize, usize)> for Array2<T> {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        assert!(
            index.0 < self.rows && index.1 < self.cols,
            "index ({}, {}) out of bounds for shape ({}, {})",
            index.0,
            index.1,
            self.rows,
            self.cols
        );
        let offset = self.offset(index.0, index.1);
        &mut self.data[offset]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// Flat buffer length is not `rows * cols`.
    BufferLength { rows: usize, cols: usize, len: usize },
    /// Nested row `row` has `found` values where `expected` were required.
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeError::BufferLength { rows, cols, len } => write!(
                f,
                "invalid shape ({}, {}) for buffer of length {}",
                rows, cols, len
            ),
            ShapeError::RaggedRow {
                row,
                expected,
                found,
            } => write!(
                f,
                "row {} has length {} but expected {}",
                row, found, expected
            ),
        }
    }
}

impl Error for ShapeError {}

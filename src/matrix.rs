//! Dense matrices over GF(2)
//!
//! The [`BitMatrix`] type wraps an [`ndarray::Array2`] of bits. Addition is XOR and
//! multiplication is AND, so that all products are computed modulo `2`. Slicing, selection,
//! stacking and transposition are delegated to `ndarray`; only the row reductions (rank and
//! inverse) are specific to GF(2). The matrices handled by this crate (generator, systematic
//! generator, parity and parity-check matrices) are only ever built for verification, so a dense
//! layout is sufficient.
//!
//! # Examples
//!
//! ```
//! use polar::{Bit, BitMatrix};
//! use Bit::{One, Zero};
//!
//! let kernel = BitMatrix::from_rows(&[vec![One, Zero], vec![One, One]])?;
//! assert_eq!(kernel.mul(&kernel)?, BitMatrix::identity(2));
//! assert_eq!(kernel.rank(), 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::fmt;

use ndarray::{concatenate, s, Array1, Array2, ArrayView1, ArrayViewMut1, Axis, Zip};

use crate::{Bit, Error};

/// Binary matrix with entries in GF(2)
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct BitMatrix {
    /// Entries
    bits: Array2<Bit>,
}

impl BitMatrix {
    /// Returns all-zero matrix of given dimensions.
    #[must_use]
    pub fn zeros(num_rows: usize, num_cols: usize) -> Self {
        Self {
            bits: Array2::from_elem((num_rows, num_cols), Bit::Zero),
        }
    }

    /// Returns identity matrix of given size.
    #[must_use]
    pub fn identity(size: usize) -> Self {
        let mut mat = Self::zeros(size, size);
        mat.bits.diag_mut().fill(Bit::One);
        mat
    }

    /// Returns matrix with given rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the rows do not all have the same length.
    pub fn from_rows(rows: &[Vec<Bit>]) -> Result<Self, Error> {
        let num_cols = rows.first().map_or(0, Vec::len);
        if let Some(row) = rows.iter().find(|row| row.len() != num_cols) {
            return Err(Error::InvalidInput(format!(
                "Expected rows of length {num_cols} (found row of length {})",
                row.len()
            )));
        }
        let bits = Array2::from_shape_vec((rows.len(), num_cols), rows.concat())
            .map_err(|err| Error::InvalidInput(err.to_string()))?;
        Ok(Self { bits })
    }

    /// Returns number of rows.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.bits.nrows()
    }

    /// Returns number of columns.
    #[must_use]
    pub fn num_cols(&self) -> usize {
        self.bits.ncols()
    }

    /// Returns entry in given row and column.
    ///
    /// # Panics
    ///
    /// Panics if the row or column index is out of range.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Bit {
        self.bits[[row, col]]
    }

    /// Sets entry in given row and column.
    ///
    /// # Panics
    ///
    /// Panics if the row or column index is out of range.
    pub fn set(&mut self, row: usize, col: usize, bit: Bit) {
        self.bits[[row, col]] = bit;
    }

    /// Returns given row.
    ///
    /// # Panics
    ///
    /// Panics if the row index is out of range.
    #[must_use]
    pub fn row(&self, row: usize) -> ArrayView1<'_, Bit> {
        self.bits.row(row)
    }

    /// Returns Kronecker product of this matrix with another one.
    #[must_use]
    pub fn kron(&self, other: &Self) -> Self {
        let (p, q) = other.bits.dim();
        let mut out = Self::zeros(self.num_rows() * p, self.num_cols() * q);
        for ((i, j), &bit) in self.bits.indexed_iter() {
            if bit == Bit::One {
                out.bits
                    .slice_mut(s![i * p .. (i + 1) * p, j * q .. (j + 1) * q])
                    .assign(&other.bits);
            }
        }
        out
    }

    /// Returns product (modulo `2`) of this matrix with another one.
    ///
    /// # Errors
    ///
    /// Returns an error if the number of columns of this matrix is not equal to the number of
    /// rows of the other one.
    pub fn mul(&self, other: &Self) -> Result<Self, Error> {
        if self.num_cols() != other.num_rows() {
            return Err(Error::InvalidInput(format!(
                "Cannot multiply {}x{} matrix by {}x{} matrix",
                self.num_rows(),
                self.num_cols(),
                other.num_rows(),
                other.num_cols()
            )));
        }
        let mut out = Self::zeros(self.num_rows(), other.num_cols());
        for i in 0 .. self.num_rows() {
            accumulate_rows(self.bits.row(i), other, out.bits.row_mut(i));
        }
        Ok(out)
    }

    /// Returns product (modulo `2`) of a row vector with this matrix.
    ///
    /// # Errors
    ///
    /// Returns an error if the length of the vector is not equal to the number of rows.
    pub fn vec_mul(&self, bits: &[Bit]) -> Result<Vec<Bit>, Error> {
        if bits.len() != self.num_rows() {
            return Err(Error::InvalidInput(format!(
                "Cannot multiply vector of length {} by {}x{} matrix",
                bits.len(),
                self.num_rows(),
                self.num_cols()
            )));
        }
        let mut out = Array1::from_elem(self.num_cols(), Bit::Zero);
        accumulate_rows(ArrayView1::from(bits), self, out.view_mut());
        Ok(out.to_vec())
    }

    /// Returns transpose of this matrix.
    #[must_use]
    pub fn transpose(&self) -> Self {
        Self {
            bits: self.bits.t().as_standard_layout().into_owned(),
        }
    }

    /// Returns matrix formed by the given rows of this matrix (in the given order).
    ///
    /// # Panics
    ///
    /// Panics if any row index is out of range.
    #[must_use]
    pub fn select_rows(&self, rows: &[usize]) -> Self {
        Self {
            bits: self.bits.select(Axis(0), rows),
        }
    }

    /// Returns matrix formed by the given columns of this matrix (in the given order).
    ///
    /// # Panics
    ///
    /// Panics if any column index is out of range.
    #[must_use]
    pub fn select_columns(&self, cols: &[usize]) -> Self {
        Self {
            bits: self.bits.select(Axis(1), cols),
        }
    }

    /// Returns matrix obtained by placing another matrix to the right of this one.
    ///
    /// # Errors
    ///
    /// Returns an error if the two matrices have different numbers of rows.
    pub fn hstack(&self, other: &Self) -> Result<Self, Error> {
        if self.num_rows() != other.num_rows() {
            return Err(Error::InvalidInput(format!(
                "Cannot stack {}x{} matrix beside {}x{} matrix",
                self.num_rows(),
                self.num_cols(),
                other.num_rows(),
                other.num_cols()
            )));
        }
        let bits = concatenate(Axis(1), &[self.bits.view(), other.bits.view()])
            .map_err(|err| Error::InvalidInput(err.to_string()))?;
        Ok(Self { bits })
    }

    /// Returns rank of this matrix over GF(2).
    #[must_use]
    pub fn rank(&self) -> usize {
        let mut mat = self.clone();
        let mut rank = 0;
        for col in 0 .. mat.num_cols() {
            if rank == mat.num_rows() {
                break;
            }
            let Some(pivot) = (rank .. mat.num_rows()).find(|&row| mat.get(row, col) == Bit::One)
            else {
                continue;
            };
            mat.swap_rows(rank, pivot);
            for row in rank + 1 .. mat.num_rows() {
                if mat.get(row, col) == Bit::One {
                    mat.add_row(rank, row);
                }
            }
            rank += 1;
        }
        rank
    }

    /// Returns inverse of this matrix over GF(2), or `None` if it is not square or is singular.
    #[must_use]
    pub fn inverse(&self) -> Option<Self> {
        if self.num_rows() != self.num_cols() {
            return None;
        }
        let size = self.num_rows();
        let mut aug = self.hstack(&Self::identity(size)).ok()?;
        for col in 0 .. size {
            let pivot = (col .. size).find(|&row| aug.get(row, col) == Bit::One)?;
            aug.swap_rows(col, pivot);
            for row in 0 .. size {
                if row != col && aug.get(row, col) == Bit::One {
                    aug.add_row(col, row);
                }
            }
        }
        Some(Self {
            bits: aug.bits.slice(s![.., size ..]).to_owned(),
        })
    }

    /// Returns Hamming weight of each row.
    #[must_use]
    pub fn row_weights(&self) -> Vec<usize> {
        self.bits
            .rows()
            .into_iter()
            .map(|row| row.iter().filter(|&&bit| bit == Bit::One).count())
            .collect()
    }

    /// Returns `true` if all entries are zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.bits.iter().all(|&bit| bit == Bit::Zero)
    }

    /// Swaps two rows.
    fn swap_rows(&mut self, row1: usize, row2: usize) {
        if row1 == row2 {
            return;
        }
        for col in 0 .. self.num_cols() {
            self.bits.swap([row1, col], [row2, col]);
        }
    }

    /// Adds (XORs) source row into destination row.
    fn add_row(&mut self, src_row: usize, dst_row: usize) {
        let src = self.bits.row(src_row).to_owned();
        Zip::from(self.bits.row_mut(dst_row))
            .and(&src)
            .for_each(|dst_bit, &bit| *dst_bit ^= bit);
    }
}

impl fmt::Display for BitMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.bits.rows().into_iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for &bit in row {
                write!(f, "{}", u8::from(bit))?;
            }
        }
        Ok(())
    }
}

/// Adds into `out` the rows of `mat` selected by the ones in `coeffs`.
fn accumulate_rows(coeffs: ArrayView1<'_, Bit>, mat: &BitMatrix, mut out: ArrayViewMut1<'_, Bit>) {
    for (k, &coeff) in coeffs.iter().enumerate() {
        if coeff == Bit::One {
            Zip::from(&mut out)
                .and(mat.bits.row(k))
                .for_each(|out_bit, &bit| *out_bit ^= bit);
        }
    }
}

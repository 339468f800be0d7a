//! All-pairs pattern evaluation
//!
//! [`PatternMatrix`] holds the pattern of every ordered pair of a pool of codes.
//! [`PatternTable`] is the matrix of a whole code space, addressed by code index.
//!
//! The batched evaluator works on 4×4 equality grids packed into a `u16`:
//! bit `4·i + j` is set when `a[i] == b[j]`. Exact matches are the diagonal
//! bits; claiming a match voids its row and column so no symbol occurrence
//! is counted twice.

use super::code::{CODE_LENGTH, Code, MAX_COLORS};
use super::pattern::Pattern;
use super::space::CodeSpace;
use rayon::prelude::*;

const DIAGONAL: u16 = 0b1000_0100_0010_0001;
const ROW: u16 = 0b1111;
const COLUMN: u16 = 0b0001_0001_0001_0001;

/// For each symbol, the 4-bit mask of positions holding it
type SymbolMasks = [u8; MAX_COLORS as usize];

fn symbol_masks(code: &Code) -> SymbolMasks {
    let mut masks = [0u8; MAX_COLORS as usize];
    for (position, &symbol) in code.symbols().iter().enumerate() {
        masks[usize::from(symbol)] |= 1 << position;
    }
    masks
}

/// Equality grid between `a` and a code described by its symbol masks
#[inline]
fn equality_grid(a: &Code, b_masks: &SymbolMasks) -> u16 {
    a.symbols()
        .iter()
        .enumerate()
        .fold(0u16, |grid, (i, &symbol)| {
            grid | (u16::from(b_masks[usize::from(symbol)]) << (CODE_LENGTH * i))
        })
}

#[inline]
fn void_pair(grid: u16, i: usize, j: usize) -> u16 {
    grid & !(ROW << (CODE_LENGTH * i)) & !(COLUMN << j)
}

/// Score an equality grid; gives the same answer as [`Pattern::calculate`]
#[inline]
fn pattern_from_grid(mut grid: u16) -> Pattern {
    let mut exact = 0u8;
    let mut diagonal = grid & DIAGONAL;
    while diagonal != 0 {
        let bit = diagonal.trailing_zeros() as usize;
        let i = bit / CODE_LENGTH;
        exact += 1;
        grid = void_pair(grid, i, i);
        diagonal &= diagonal - 1;
    }

    let mut color_only = 0u8;
    while grid != 0 {
        // Lowest set bit is the first remaining (i, j) in row-major order
        let bit = grid.trailing_zeros() as usize;
        color_only += 1;
        grid = void_pair(grid, bit / CODE_LENGTH, bit % CODE_LENGTH);
    }

    Pattern::new(5 * exact + color_only)
}

/// Square matrix of patterns for every ordered pair of a pool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatrix {
    size: usize,
    cells: Vec<Pattern>,
}

impl PatternMatrix {
    /// Evaluate all pairs of `pool` with the batched grid evaluator
    ///
    /// Rows are computed in parallel; only the upper triangle is evaluated and
    /// then mirrored.
    ///
    /// # Examples
    /// ```
    /// use mastermind_solver::core::{Code, Pattern, PatternMatrix};
    ///
    /// let pool: Vec<Code> = ["AABB", "ABCC", "CCCC"]
    ///     .iter()
    ///     .map(|s| Code::parse(s).unwrap())
    ///     .collect();
    /// let matrix = PatternMatrix::evaluate(&pool);
    ///
    /// assert_eq!(matrix.get(0, 0), Pattern::PERFECT);
    /// assert_eq!(matrix.get(0, 1), Pattern::calculate(&pool[0], &pool[1]));
    /// assert_eq!(matrix.get(1, 0), matrix.get(0, 1));
    /// ```
    #[must_use]
    pub fn evaluate(pool: &[Code]) -> Self {
        let size = pool.len();
        let masks: Vec<SymbolMasks> = pool.iter().map(symbol_masks).collect();
        let mut cells = vec![Pattern::new(0); size * size];

        if size == 0 {
            return Self { size, cells };
        }

        cells
            .par_chunks_mut(size)
            .enumerate()
            .for_each(|(i, row)| {
                let a = &pool[i];
                for j in i..size {
                    row[j] = pattern_from_grid(equality_grid(a, &masks[j]));
                }
            });

        Self::mirror_upper(size, &mut cells);
        Self { size, cells }
    }

    /// Evaluate all pairs of `pool` with one scalar call per unordered pair
    ///
    /// Reference implementation for [`PatternMatrix::evaluate`].
    #[must_use]
    pub fn evaluate_scalar(pool: &[Code]) -> Self {
        let size = pool.len();
        let mut cells = vec![Pattern::new(0); size * size];
        for (i, a) in pool.iter().enumerate() {
            for (j, b) in pool.iter().enumerate().skip(i) {
                let pattern = Pattern::calculate(a, b);
                cells[i * size + j] = pattern;
                cells[j * size + i] = pattern;
            }
        }
        Self { size, cells }
    }

    /// Gather the matrix of `pool` from a precomputed table
    ///
    /// # Errors
    /// Returns `CodeError` if a pool code is outside the table's code space.
    pub fn from_table(table: &PatternTable, pool: &[Code]) -> Result<Self, super::CodeError> {
        let indices = pool
            .iter()
            .map(|code| table.space().index_of(code))
            .collect::<Result<Vec<_>, _>>()?;

        let size = pool.len();
        let mut cells = vec![Pattern::new(0); size * size];
        if size > 0 {
            cells
                .par_chunks_mut(size)
                .zip(indices.par_iter())
                .for_each(|(row, &a)| {
                    let source = table.row(a);
                    for (cell, &b) in row.iter_mut().zip(&indices) {
                        *cell = source[b];
                    }
                });
        }

        Ok(Self { size, cells })
    }

    fn mirror_upper(size: usize, cells: &mut [Pattern]) {
        for i in 0..size {
            for j in (i + 1)..size {
                cells[j * size + i] = cells[i * size + j];
            }
        }
    }

    /// Number of codes in the pool
    #[inline]
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Pattern between pool members `i` and `j`
    ///
    /// # Panics
    /// Panics if either index is out of range
    #[inline]
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> Pattern {
        self.cells[i * self.size + j]
    }

    /// Patterns of pool member `i` against every pool member
    #[inline]
    #[must_use]
    pub fn row(&self, i: usize) -> &[Pattern] {
        &self.cells[i * self.size..(i + 1) * self.size]
    }

    /// Iterate over all rows in pool order
    pub fn rows(&self) -> impl Iterator<Item = &[Pattern]> {
        self.cells.chunks(self.size.max(1)).take(self.size)
    }

    /// Parallel iterator over all rows in pool order
    pub fn par_rows(&self) -> impl IndexedParallelIterator<Item = &[Pattern]> {
        self.cells.par_chunks(self.size.max(1)).take(self.size)
    }
}

/// Precomputed pattern matrix for a full code space
///
/// Rows and columns are code indices, so lookups need no evaluation at all.
#[derive(Debug, Clone)]
pub struct PatternTable {
    space: CodeSpace,
    matrix: PatternMatrix,
}

impl PatternTable {
    /// Evaluate every pair of codes of `space`
    ///
    /// For 8 colors this is 4096 × 4096 patterns (16 MiB).
    #[must_use]
    pub fn build(space: CodeSpace) -> Self {
        let matrix = PatternMatrix::evaluate(&space.all_codes());
        Self { space, matrix }
    }

    /// The code space this table covers
    #[inline]
    #[must_use]
    pub const fn space(&self) -> CodeSpace {
        self.space
    }

    /// Pattern between two code indices
    #[inline]
    #[must_use]
    pub fn get(&self, a: usize, b: usize) -> Pattern {
        self.matrix.get(a, b)
    }

    /// Patterns of code index `a` against every code of the space
    #[inline]
    #[must_use]
    pub fn row(&self, a: usize) -> &[Pattern] {
        self.matrix.row(a)
    }

    /// Pattern between two codes of the space
    ///
    /// # Errors
    /// Returns `CodeError` if either code is outside the table's code space.
    pub fn pattern(&self, a: &Code, b: &Code) -> Result<Pattern, super::CodeError> {
        Ok(self.get(self.space.index_of(a)?, self.space.index_of(b)?))
    }
}

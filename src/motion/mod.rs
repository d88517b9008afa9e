use crate::{error::Result, invalid_argument};

pub mod block_matching;
pub mod warp;

pub use block_matching::{BlockMatcher, ExhaustiveBlockMatcher};
pub use warp::warp;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MotionVector {
    pub dx: i32,
    pub dy: i32,
}

impl MotionVector {
    pub fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MotionField {
    pub rows: usize,
    pub cols: usize,
    vectors: Vec<MotionVector>,
}

impl MotionField {
    pub fn new(rows: usize, cols: usize, vectors: Vec<MotionVector>) -> Result<Self> {
        if vectors.len() != rows * cols {
            return Err(invalid_argument!(
                "{}x{} motion field needs {} vectors, got {}",
                rows,
                cols,
                rows * cols,
                vectors.len()
            ));
        }

        Ok(Self {
            rows,
            cols,
            vectors,
        })
    }

    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            vectors: vec![MotionVector::default(); rows * cols],
        }
    }

    pub fn get(&self, row: usize, col: usize) -> MotionVector {
        self.vectors[row * self.cols + col]
    }

    pub fn set(&mut self, row: usize, col: usize, vector: MotionVector) {
        self.vectors[row * self.cols + col] = vector;
    }

    pub fn vectors(&self) -> &[MotionVector] {
        &self.vectors
    }

    pub fn is_zero(&self) -> bool {
        self.vectors.iter().all(|vector| *vector == MotionVector::default())
    }

    pub fn shifted(&self, offset: i32) -> MotionField {
        Self {
            rows: self.rows,
            cols: self.cols,
            vectors: self
                .vectors
                .iter()
                .map(|vector| MotionVector::new(vector.dx + offset, vector.dy + offset))
                .collect(),
        }
    }
}

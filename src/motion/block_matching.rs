use crate::{
    codec::residual::{check_same_shape, Residual},
    error::Result,
    image::Frame,
    invalid_argument,
};

use super::{warp, MotionField, MotionVector};

/// The returned residual is `prediction - current`, where the prediction is
/// [`warp`](super::warp)`(previous, field, block_size)`. Decoders invert it as
/// `prediction - residual`.
pub trait BlockMatcher {
    fn block_match(
        &self,
        previous: &Frame,
        current: &Frame,
        block_size: usize,
        search_radius: u32,
    ) -> Result<(MotionField, Residual)>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ExhaustiveBlockMatcher;

impl ExhaustiveBlockMatcher {
    fn sum_of_absolute_differences(
        previous: &Frame,
        current: &Frame,
        top: usize,
        left: usize,
        block_size: usize,
        candidate_top: usize,
        candidate_left: usize,
    ) -> u64 {
        let mut sum: u64 = 0;

        for row in 0..block_size {
            for col in 0..block_size {
                for channel in 0..current.channels {
                    let actual = current.sample(top + row, left + col, channel);
                    let predicted =
                        previous.sample(candidate_top + row, candidate_left + col, channel);
                    sum += actual.abs_diff(predicted) as u64;
                }
            }
        }

        sum
    }

    fn search_block(
        previous: &Frame,
        current: &Frame,
        top: usize,
        left: usize,
        block_size: usize,
        search_radius: i64,
    ) -> MotionVector {
        let max_top = (current.height() - block_size) as i64;
        let max_left = (current.width() - block_size) as i64;
        let mut best = MotionVector::default();
        let mut best_sad =
            Self::sum_of_absolute_differences(previous, current, top, left, block_size, top, left);

        for dy in -search_radius..=search_radius {
            let candidate_top = top as i64 + dy;
            if candidate_top < 0 || candidate_top > max_top {
                continue;
            }

            for dx in -search_radius..=search_radius {
                let candidate_left = left as i64 + dx;
                if candidate_left < 0 || candidate_left > max_left || best_sad == 0 {
                    continue;
                }

                let sad = Self::sum_of_absolute_differences(
                    previous,
                    current,
                    top,
                    left,
                    block_size,
                    candidate_top as usize,
                    candidate_left as usize,
                );

                if sad < best_sad {
                    best_sad = sad;
                    best = MotionVector::new(dx as i32, dy as i32);
                }
            }
        }

        best
    }
}

impl BlockMatcher for ExhaustiveBlockMatcher {
    fn block_match(
        &self,
        previous: &Frame,
        current: &Frame,
        block_size: usize,
        search_radius: u32,
    ) -> Result<(MotionField, Residual)> {
        check_same_shape(previous, current)?;

        if block_size == 0 || block_size > current.width() || block_size > current.height() {
            return Err(invalid_argument!(
                "block size {} does not fit a {}x{} frame",
                block_size,
                current.width(),
                current.height()
            ));
        }

        let rows = current.height() / block_size;
        let cols = current.width() / block_size;
        let mut field = MotionField::zeros(rows, cols);

        for block_row in 0..rows {
            for block_col in 0..cols {
                let vector = Self::search_block(
                    previous,
                    current,
                    block_row * block_size,
                    block_col * block_size,
                    block_size,
                    search_radius as i64,
                );
                field.set(block_row, block_col, vector);
            }
        }

        let prediction = warp(previous, &field, block_size)?;
        let residual = Residual::difference(&prediction, current)?;

        Ok((field, residual))
    }
}

use crate::{error::Result, image::Frame, invalid_argument};

use super::MotionField;

pub fn warp(previous: &Frame, field: &MotionField, block_size: usize) -> Result<Frame> {
    if block_size == 0
        || field.rows * block_size > previous.height()
        || field.cols * block_size > previous.width()
    {
        return Err(invalid_argument!(
            "{}x{} motion field of {} pixel blocks does not fit a {}x{} frame",
            field.rows,
            field.cols,
            block_size,
            previous.width(),
            previous.height()
        ));
    }

    let mut prediction = previous.clone();
    let max_row = previous.height() as i64 - 1;
    let max_col = previous.width() as i64 - 1;

    for block_row in 0..field.rows {
        for block_col in 0..field.cols {
            let vector = field.get(block_row, block_col);

            for row in block_row * block_size..(block_row + 1) * block_size {
                let source_row = (row as i64 + vector.dy as i64).clamp(0, max_row) as usize;

                for col in block_col * block_size..(block_col + 1) * block_size {
                    let source_col = (col as i64 + vector.dx as i64).clamp(0, max_col) as usize;

                    for channel in 0..previous.channels {
                        let value = previous.sample(source_row, source_col, channel);
                        prediction.set_sample(row, col, channel, value);
                    }
                }
            }
        }
    }

    Ok(prediction)
}

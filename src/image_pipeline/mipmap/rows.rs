use rayon::prelude::*;

use crate::image_pipeline::raster::Rgb;

/// Fills `dst` one row at a time with `fill(row_index, row)`.
///
/// Rows never read each other, so with `parallel` set they are handed to the
/// rayon pool; the call returns only once every row is written.
pub(crate) fn fill_rows<F>(dst: &mut [Rgb], width: usize, parallel: bool, fill: F)
where
    F: Fn(usize, &mut [Rgb]) + Send + Sync,
{
    if parallel {
        dst.par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| fill(y, row));
    } else {
        dst.chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| fill(y, row));
    }
}

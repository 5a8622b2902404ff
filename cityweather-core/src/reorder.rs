//! Drag gesture geometry for the favorites list.

/// Height of one favorites row in pixels.
pub const ROW_HEIGHT_PX: f64 = 50.0;

/// Maps a vertical drag offset to the list position the dragged row lands on.
///
/// `list_len` is the length of the list including the dragged row, so the
/// result is always a valid insertion index once that row has been taken out:
/// `round(offset / row_height)` clamped to `[0, list_len - 1]`.
pub fn index_from_offset(offset: f64, row_height: f64, list_len: usize) -> usize {
    if list_len == 0 || offset.is_nan() || !(row_height.is_finite() && row_height > 0.0) {
        return 0;
    }

    let last = list_len - 1;
    let slot = (offset / row_height).round();

    if slot <= 0.0 {
        0
    } else if slot >= last as f64 {
        last
    } else {
        slot as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_offset_is_first_row() {
        assert_eq!(index_from_offset(0.0, ROW_HEIGHT_PX, 5), 0);
    }

    #[test]
    fn offset_rounds_to_nearest_row() {
        assert_eq!(index_from_offset(74.0, ROW_HEIGHT_PX, 5), 1);
        assert_eq!(index_from_offset(75.0, ROW_HEIGHT_PX, 5), 2);
        assert_eq!(index_from_offset(124.9, ROW_HEIGHT_PX, 5), 2);
    }

    #[test]
    fn negative_offset_clamps_to_first_row() {
        assert_eq!(index_from_offset(-400.0, ROW_HEIGHT_PX, 3), 0);
        assert_eq!(index_from_offset(f64::NEG_INFINITY, ROW_HEIGHT_PX, 3), 0);
    }

    #[test]
    fn offset_beyond_list_clamps_to_last_row() {
        assert_eq!(index_from_offset(10_000.0, ROW_HEIGHT_PX, 3), 2);
        assert_eq!(index_from_offset(f64::INFINITY, ROW_HEIGHT_PX, 3), 2);
    }

    #[test]
    fn degenerate_inputs_fall_back_to_zero() {
        assert_eq!(index_from_offset(100.0, ROW_HEIGHT_PX, 0), 0);
        assert_eq!(index_from_offset(f64::NAN, ROW_HEIGHT_PX, 4), 0);
        assert_eq!(index_from_offset(100.0, 0.0, 4), 0);
    }
}

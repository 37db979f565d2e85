use std::ops::RangeInclusive;

use super::FloatNum;

pub fn limit_at_range(value: FloatNum, range: RangeInclusive<FloatNum>) -> FloatNum {
    if &value < range.start() {
        *range.start()
    } else if &value > range.end() {
        *range.end()
    } else {
        value
    }
}

pub(crate) fn is_finite_positive(value: FloatNum) -> bool {
    value.is_finite() && value > 0.
}

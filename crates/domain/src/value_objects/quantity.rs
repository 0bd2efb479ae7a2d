//! Bounded counts for canonical choices.
//!
//! The rules catalog hands us integers of whatever width its JSON decoder
//! produced. Canonical choices carry 32-bit counts because they are persisted
//! and sent over the wire as `int32`.

/// Clamp any integer into the `i32` range.
///
/// # Examples
///
/// ```
/// use charforge_domain::value_objects::clamp_i32;
///
/// assert_eq!(clamp_i32(7_i64), 7);
/// assert_eq!(clamp_i32(u64::MAX), i32::MAX);
/// assert_eq!(clamp_i32(i64::MIN), i32::MIN);
/// ```
pub fn clamp_i32(value: impl Into<i128>) -> i32 {
    let value: i128 = value.into();
    if value > i128::from(i32::MAX) {
        i32::MAX
    } else if value < i128::from(i32::MIN) {
        i32::MIN
    } else {
        value as i32
    }
}

/// Clamp a count into `1..=i32::MAX`.
///
/// Used for `choose_count` and item quantities: a choice where the player picks
/// zero things, or a grant of zero items, is never meaningful downstream.
pub fn positive_count(value: impl Into<i128>) -> i32 {
    clamp_i32(value).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_in_range() {
        assert_eq!(clamp_i32(0_i32), 0);
        assert_eq!(clamp_i32(-5_i64), -5);
        assert_eq!(clamp_i32(42_u8), 42);
    }

    #[test]
    fn test_clamp_overflow() {
        assert_eq!(clamp_i32(i64::MAX), i32::MAX);
        assert_eq!(clamp_i32(u32::MAX), i32::MAX);
        assert_eq!(clamp_i32(i64::from(i32::MAX) + 1), i32::MAX);
    }

    #[test]
    fn test_clamp_underflow() {
        assert_eq!(clamp_i32(i64::MIN), i32::MIN);
        assert_eq!(clamp_i32(i64::from(i32::MIN) - 1), i32::MIN);
    }

    #[test]
    fn test_positive_count() {
        assert_eq!(positive_count(3_i64), 3);
        assert_eq!(positive_count(0_i64), 1);
        assert_eq!(positive_count(-12_i64), 1);
        assert_eq!(positive_count(u64::MAX), i32::MAX);
    }
}

//! Garbage-index scanning.

/// Smallest index `>= start` flagged in `garbage`, or `garbage.len()` if
/// there is none.
pub fn next_garbage(start: usize, garbage: &[bool]) -> usize {
    garbage
        .iter()
        .skip(start)
        .position(|&g| g)
        .map_or(garbage.len(), |offset| start + offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_garbage_boundaries() {
        let mask = [false, true, false, true];
        assert_eq!(next_garbage(0, &mask), 1);
        assert_eq!(next_garbage(1, &mask), 1);
        assert_eq!(next_garbage(2, &mask), 3);
        assert_eq!(next_garbage(4, &mask), 4);
    }

    #[test]
    fn test_next_garbage_without_garbage() {
        assert_eq!(next_garbage(0, &[false, false]), 2);
        assert_eq!(next_garbage(0, &[]), 0);
    }

    #[test]
    fn test_next_garbage_past_end() {
        assert_eq!(next_garbage(7, &[true, true]), 2);
    }
}

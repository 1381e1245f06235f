//! Head/tail resize planning for elastic sequences.
//!
//! The board's column count tracks the active-player count, but
//! columns holding pieces or pending placements must survive every
//! resize. The planner reduces that to pure arithmetic over the first
//! and last kept indices.

/// Calculates a resizing suggestion for each end of a sequence.
/// Positive values suggest that many insertions, negative values that
/// many removals; removals never touch the kept range.
///
/// With no kept element the full size delta is split evenly, head
/// taking the floor half. Otherwise the kept span is padded out to the
/// target, and the deltas are whatever turns the actual pre/post-kept
/// counts into that padding. A sequence already at target size is left
/// untouched rather than recentered.
///
/// For every input `len + head + tail >= target`, with equality
/// whenever `target >= len`.
pub fn suggestions<T>(items: &[T], target: isize, keep: impl Fn(&T) -> bool) -> (isize, isize) {
    let len = items.len() as isize;
    let (head, tail) = match items.iter().position(|i| keep(i)) {
        None => {
            let total = target.max(0) - len;
            let head = total / 2;
            (head, total - head)
        }
        Some(first) => {
            let last = items
                .iter()
                .rposition(|i| keep(i))
                .expect("rposition agrees with position");
            let minimal = (last - first + 1) as isize;
            let padding = target.max(minimal) - minimal;
            let head_padding = padding / 2;
            let tail_padding = padding - head_padding;
            let head = head_padding - first as isize;
            let tail = last as isize + 1 - len + tail_padding;
            (head, tail)
        }
    };
    // net-zero suggestions would only shift the kept span sideways
    let (head, tail) = match head + tail {
        0 => (0, 0),
        _ => (head, tail),
    };
    debug_assert!(
        len + head + tail >= target,
        "suggestions fall short of target (len: {}; target: {}; head: {}; tail: {})",
        len,
        target,
        head,
        tail
    );
    debug_assert!(
        target < len || len + head + tail == target,
        "suggestions overshoot target (len: {}; target: {}; head: {}; tail: {})",
        len,
        target,
        head,
        tail
    );
    (head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sequences encoded as strings: 'K' marks an element that must be
    /// kept, anything else is expendable.
    fn plan(encoded: &str, target: isize) -> (isize, isize) {
        let items: Vec<char> = encoded.chars().collect();
        suggestions(&items, target, |c| *c == 'K')
    }

    #[rustfmt::skip]
    const CASES: &[(&str, isize, (isize, isize))] = &[
        ("",    -1, (0, 0)),  ("",    0, (0, 0)),   ("",    1, (0, 1)),
        ("",     2, (1, 1)),  ("",    3, (1, 2)),   ("",    4, (2, 2)),
        ("K",   -1, (0, 0)),  ("K",   0, (0, 0)),   ("K",   1, (0, 0)),
        ("K",    2, (0, 1)),  ("K",   3, (1, 1)),   ("K",   4, (1, 2)),
        ("K",    5, (2, 2)),
        ("1",   -1, (0, -1)), ("1",   0, (0, -1)),  ("1",   1, (0, 0)),
        ("1",    2, (0, 1)),  ("1",   3, (1, 1)),   ("1",   4, (1, 2)),
        ("1",    5, (2, 2)),
        ("KK",  -1, (0, 0)),  ("KK",  0, (0, 0)),   ("KK",  1, (0, 0)),
        ("KK",   2, (0, 0)),  ("KK",  3, (0, 1)),   ("KK",  4, (1, 1)),
        ("KK",   5, (1, 2)),  ("KK",  6, (2, 2)),
        ("K1",  -1, (0, -1)), ("K1",  0, (0, -1)),  ("K1",  1, (0, -1)),
        ("K1",   2, (0, 0)),  ("K1",  3, (1, 0)),   ("K1",  4, (1, 1)),
        ("K1",   5, (2, 1)),  ("K1",  6, (2, 2)),
        ("1K",  -1, (-1, 0)), ("1K",  0, (-1, 0)),  ("1K",  1, (-1, 0)),
        ("1K",   2, (0, 0)),  ("1K",  3, (0, 1)),   ("1K",  4, (0, 2)),
        ("1K",   5, (1, 2)),  ("1K",  6, (1, 3)),
        ("11",  -1, (-1, -1)), ("11", 0, (-1, -1)), ("11",  1, (0, -1)),
        ("11",   2, (0, 0)),  ("11",  3, (0, 1)),   ("11",  4, (1, 1)),
        ("11",   5, (1, 2)),  ("11",  6, (2, 2)),
        ("KKK", -1, (0, 0)),  ("KKK", 0, (0, 0)),   ("KKK", 1, (0, 0)),
        ("KKK",  2, (0, 0)),  ("KKK", 3, (0, 0)),   ("KKK", 4, (0, 1)),
        ("KKK",  5, (1, 1)),  ("KKK", 6, (1, 2)),   ("KKK", 7, (2, 2)),
        ("KK1", -1, (0, -1)), ("KK1", 0, (0, -1)),  ("KK1", 1, (0, -1)),
        ("KK1",  2, (0, -1)), ("KK1", 3, (0, 0)),   ("KK1", 4, (1, 0)),
        ("KK1",  5, (1, 1)),  ("KK1", 6, (2, 1)),   ("KK1", 7, (2, 2)),
        ("K1K", -1, (0, 0)),  ("K1K", 0, (0, 0)),   ("K1K", 1, (0, 0)),
        ("K1K",  2, (0, 0)),  ("K1K", 3, (0, 0)),   ("K1K", 4, (0, 1)),
        ("K1K",  5, (1, 1)),  ("K1K", 6, (1, 2)),   ("K1K", 7, (2, 2)),
        ("K12", -1, (0, -2)), ("K12", 0, (0, -2)),  ("K12", 1, (0, -2)),
        ("K12",  2, (0, -1)), ("K12", 3, (0, 0)),   ("K12", 4, (1, 0)),
        ("K12",  5, (2, 0)),  ("K12", 6, (2, 1)),   ("K12", 7, (3, 1)),
        ("1KK", -1, (-1, 0)), ("1KK", 0, (-1, 0)),  ("1KK", 1, (-1, 0)),
        ("1KK",  2, (-1, 0)), ("1KK", 3, (0, 0)),   ("1KK", 4, (0, 1)),
        ("1KK",  5, (0, 2)),  ("1KK", 6, (1, 2)),   ("1KK", 7, (1, 3)),
        ("1K1", -1, (-1, -1)), ("1K1", 0, (-1, -1)), ("1K1", 1, (-1, -1)),
        ("1K1",  2, (-1, 0)), ("1K1", 3, (0, 0)),   ("1K1", 4, (0, 1)),
        ("1K1",  5, (1, 1)),  ("1K1", 6, (1, 2)),   ("1K1", 7, (2, 2)),
        ("12K", -1, (-2, 0)), ("12K", 0, (-2, 0)),  ("12K", 1, (-2, 0)),
        ("12K",  2, (-2, 1)), ("12K", 3, (0, 0)),   ("12K", 4, (-1, 2)),
        ("12K",  5, (0, 2)),  ("12K", 6, (0, 3)),   ("12K", 7, (1, 3)),
        ("121", -1, (-1, -2)), ("121", 0, (-1, -2)), ("121", 1, (-1, -1)),
        ("121",  2, (0, -1)), ("121", 3, (0, 0)),   ("121", 4, (0, 1)),
        ("121",  5, (1, 1)),  ("121", 6, (1, 2)),   ("121", 7, (2, 2)),
    ];

    #[test]
    fn balanced_suggestions() {
        for (encoded, target, expected) in CASES {
            assert_eq!(
                plan(encoded, *target),
                *expected,
                "pattern {:?} target {}",
                encoded,
                target
            );
        }
    }
    #[test]
    fn never_falls_short_of_target() {
        for (encoded, target, _) in CASES {
            let (head, tail) = plan(encoded, *target);
            let len = encoded.len() as isize;
            assert!(len + head + tail >= *target);
            if *target >= len {
                assert_eq!(len + head + tail, *target);
            }
        }
    }
    #[test]
    fn never_discards_a_kept_element() {
        for (encoded, target, _) in CASES {
            let (head, tail) = plan(encoded, *target);
            let first = encoded.chars().position(|c| c == 'K');
            let last = encoded.chars().rev().position(|c| c == 'K');
            if let (Some(first), Some(last)) = (first, last) {
                assert!(-head <= first as isize, "head removal into kept range");
                assert!(-tail <= last as isize, "tail removal into kept range");
            }
        }
    }
}

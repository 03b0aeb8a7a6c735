use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};
// Shared error type for every comparison.
use bbrc_helpers::StatsError;

/// Checks that `m2` can be compared against `m1`: it must be non-empty and
/// every one of its keys must also be a key of `m1`.
///
/// A third check compares the number of keys only `m1` has against the size
/// difference of the two maps. With unique keys it cannot fire once the
/// subset check passed; it is kept so both agreement measures reject exactly
/// what the service client rejects.
fn check_key_sets<K, V, S>(
    m1: &HashMap<K, V, S>,
    m2: &HashMap<K, V, S>,
    operation: &'static str,
) -> Result<(), StatsError>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    if m2.is_empty() {
        return Err(StatsError::EmptyInput.logged(operation));
    }

    let missing = m2.keys().filter(|k| !m1.contains_key(*k)).count();
    if missing > 0 {
        return Err(StatsError::KeySetMismatch { missing }.logged(operation));
    }

    // Signed, so a larger m2 cannot wrap around.
    let unknown = m1.keys().filter(|k| !m2.contains_key(*k)).count();
    let allowed = m1.len() as isize - m2.len() as isize;
    if unknown as isize > allowed {
        return Err(StatsError::SizeInconsistency { unknown, allowed }.logged(operation));
    }

    Ok(())
}

/// Fraction of the keys of `m2` on which both maps are at or above `threshold`.
///
/// The denominator is always `m2.len()`, so keys of `m1` that `m2` lacks do
/// not count against the score.
///
/// # Arguments
///
/// * `m1`: The reference confidences, keyed by sample.
/// * `m2`: The confidences to compare; its keys must all be keys of `m1`.
/// * `threshold`: The value both confidences have to reach.
///
/// # Errors
///
/// Returns `StatsError::EmptyInput` if `m2` is empty.
/// Returns `StatsError::KeySetMismatch` if `m2` has a key `m1` lacks.
/// Returns `StatsError::SizeInconsistency` if `m1` has more keys of its own
/// than the size difference of the maps allows.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use agreement::correct_sign_fraction;
///
/// let m1 = HashMap::from([("foo", 0.96), ("bar", 0.94), ("baz", 1.0)]);
/// let m2 = HashMap::from([("bar", 0.96), ("foo", 0.96)]);
/// assert_eq!(correct_sign_fraction(&m1, &m2, 0.95).unwrap(), 0.5);
/// ```
pub fn correct_sign_fraction<K, V, S>(
    m1: &HashMap<K, V, S>,
    m2: &HashMap<K, V, S>,
    threshold: V,
) -> Result<f64, StatsError>
where
    K: Eq + Hash,
    V: PartialOrd,
    S: BuildHasher,
{
    check_key_sets(m1, m2, "correct_sign_fraction")?;

    let hits = m2
        .iter()
        .filter(|&(k, v2)| {
            m1.get(k)
                .is_some_and(|v1| *v1 >= threshold && *v2 >= threshold)
        })
        .count();

    Ok(hits as f64 / m2.len() as f64)
}

/// Fraction of the keys of `m2` on which both maps hold equal values.
///
/// Equality is exact `PartialEq`; there is no tolerance for floats.
///
/// # Errors
///
/// Same validation as [`correct_sign_fraction`].
pub fn common_fraction_kv<K, V, S>(
    m1: &HashMap<K, V, S>,
    m2: &HashMap<K, V, S>,
) -> Result<f64, StatsError>
where
    K: Eq + Hash,
    V: PartialEq,
    S: BuildHasher,
{
    check_key_sets(m1, m2, "common_fraction_kv")?;

    let hits = m2
        .iter()
        .filter(|&(k, v2)| m1.get(k).is_some_and(|v1| v1 == v2))
        .count();

    Ok(hits as f64 / m2.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use bbrc_helpers::{ErrorKind, Value};

    fn confidences() -> HashMap<&'static str, f64> {
        HashMap::from([("foo", 0.96), ("bar", 0.94), ("baz", 1.0)])
    }

    #[test]
    fn test_correct_sign_fraction_example() {
        let m2 = HashMap::from([("bar", 0.96), ("foo", 0.96)]);
        let result = correct_sign_fraction(&confidences(), &m2, 0.95).unwrap();
        assert_abs_diff_eq!(result, 0.5);
    }

    #[test]
    fn test_correct_sign_fraction_needs_both_sides() {
        // m1 clears the threshold everywhere, m2 only on "foo".
        let m1 = HashMap::from([("foo", 0.99), ("bar", 0.99)]);
        let m2 = HashMap::from([("foo", 0.99), ("bar", 0.10)]);
        assert_abs_diff_eq!(correct_sign_fraction(&m1, &m2, 0.5).unwrap(), 0.5);
        assert_abs_diff_eq!(correct_sign_fraction(&m1, &m1, 0.5).unwrap(), 1.0);
        assert_abs_diff_eq!(correct_sign_fraction(&m1, &m2, 1.0).unwrap(), 0.0);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let m = HashMap::from([("a", 0.95)]);
        assert_abs_diff_eq!(correct_sign_fraction(&m, &m, 0.95).unwrap(), 1.0);
    }

    #[test]
    fn test_common_fraction_kv_example() {
        let m1 = HashMap::from([("foo", 1), ("bar", 0), ("baz", 1)]);
        let m2 = HashMap::from([("bar", 0), ("foo", 0)]);
        assert_abs_diff_eq!(common_fraction_kv(&m1, &m2).unwrap(), 0.5);
    }

    #[test]
    fn test_common_fraction_kv_self_comparison() {
        let m = confidences();
        assert_abs_diff_eq!(common_fraction_kv(&m, &m).unwrap(), 1.0);
    }

    #[test]
    fn test_common_fraction_kv_with_untyped_values() {
        let m1 = HashMap::from([
            ("foo", Value::Integer(1)),
            ("bar", Value::from("active")),
            ("baz", Value::Missing),
        ]);
        let m2 = HashMap::from([
            ("foo", Value::Real(1.0)),
            ("bar", Value::from("inactive")),
            ("baz", Value::Missing),
        ]);
        let result = common_fraction_kv(&m1, &m2).unwrap();
        assert_abs_diff_eq!(result, 2.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_error_on_empty_second_map() {
        let empty: HashMap<&str, f64> = HashMap::new();
        assert_eq!(
            correct_sign_fraction(&confidences(), &empty, 0.5),
            Err(StatsError::EmptyInput)
        );
        assert_eq!(
            common_fraction_kv(&confidences(), &empty),
            Err(StatsError::EmptyInput)
        );
    }

    #[test]
    fn test_error_on_unknown_keys() {
        let m2 = HashMap::from([("foo", 0.96), ("qux", 0.5), ("quux", 0.1)]);
        let result = correct_sign_fraction(&confidences(), &m2, 0.5);
        assert_eq!(result, Err(StatsError::KeySetMismatch { missing: 2 }));

        let result = common_fraction_kv(&confidences(), &m2);
        assert!(matches!(result, Err(e) if e.kind() == ErrorKind::KeySetMismatch));
    }

    #[test]
    fn test_error_when_second_map_is_bigger() {
        let small = HashMap::from([("foo", 1.0)]);
        let result = common_fraction_kv(&small, &confidences());
        assert!(matches!(result, Err(StatsError::KeySetMismatch { .. })));
    }

    #[test]
    fn test_empty_first_map() {
        let empty: HashMap<&str, f64> = HashMap::new();
        let result = correct_sign_fraction(&empty, &confidences(), 0.5);
        assert_eq!(result, Err(StatsError::KeySetMismatch { missing: 3 }));
    }
}

use ndarray::Array1;
use tracing::warn;
// Core components from the shared library.
use bbrc_helpers::{Label, Occurrence, StatsError};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// What a support vector is divided by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub enum Normalization {
    /// The sum of all occurrence counts.
    #[default]
    OccurrenceTotal,
    /// The number of samples, i.e. the length of `y`.
    SampleCount,
}

/// Resolves every label of `y` to its position in `classes`.
fn class_indices<L: Label>(
    classes: &[L],
    y: &[L],
    operation: &'static str,
) -> Result<Vec<usize>, StatsError> {
    y.iter()
        .map(|val| {
            if !val.is_label() {
                let msg = format!("incorrect type for y '{}'", val);
                return Err(StatsError::InvalidElementType(msg).logged(operation));
            }
            classes.iter().position(|c| c == val).ok_or_else(|| {
                let allowed: Vec<String> = classes.iter().map(ToString::to_string).collect();
                let msg = format!("y '{}' not in allowed classes '{}'", val, allowed.join(","));
                StatsError::InvalidElementType(msg).logged(operation)
            })
        })
        .collect()
}

fn occurrence_counts<O: Occurrence>(
    occurrences: &[O],
    operation: &'static str,
) -> Result<Vec<u128>, StatsError> {
    occurrences
        .iter()
        .map(|val| {
            val.count().ok_or_else(|| {
                let msg = format!("occ '{}' not an Integer >= 0", val);
                StatsError::InvalidElementType(msg).logged(operation)
            })
        })
        .collect()
}

fn check_length(
    what: &'static str,
    expected: usize,
    actual: usize,
    operation: &'static str,
) -> Result<(), StatsError> {
    if expected != actual {
        return Err(StatsError::LengthMismatch {
            what,
            expected,
            actual,
        }
        .logged(operation));
    }
    Ok(())
}

/// Computes the relative support of every class among the occurring samples.
///
/// Each sample `i` with `occurrences[i] >= 1` adds one to the cell of its
/// class, and the whole vector is then divided by the sum of `occurrences`.
/// The result is ordered like `classes`.
///
/// # Arguments
///
/// * `classes`: The allowed labels. Their order fixes the output order.
/// * `y`: The label of each sample. Every label must be one of `classes`.
/// * `occurrences`: Non-negative counts, one per sample.
///
/// # Errors
///
/// Returns `StatsError::InvalidElementType` if a label is missing or not in
/// `classes`, or if an occurrence is not a non-negative integer.
/// Returns `StatsError::LengthMismatch` if `y` and `occurrences` differ in length.
///
/// If every occurrence is zero the division still happens and the vector is
/// all NaN.
pub fn relative_support<L, O>(
    classes: &[L],
    y: &[L],
    occurrences: &[O],
) -> Result<Array1<f64>, StatsError>
where
    L: Label,
    O: Occurrence,
{
    relative_support_with(classes, y, occurrences, Normalization::OccurrenceTotal)
}

/// [`relative_support`] with an explicit normalization basis.
///
/// With `Normalization::SampleCount` the counts are divided by `y.len()`, which
/// keeps the vector's sum at or below one.
pub fn relative_support_with<L, O>(
    classes: &[L],
    y: &[L],
    occurrences: &[O],
    basis: Normalization,
) -> Result<Array1<f64>, StatsError>
where
    L: Label,
    O: Occurrence,
{
    const OP: &str = "relative_support";

    let indices = class_indices(classes, y, OP)?;
    let counts = occurrence_counts(occurrences, OP)?;
    check_length("y and occ", y.len(), counts.len(), OP)?;

    let mut support = Array1::<f64>::zeros(classes.len());
    for (&idx, &n) in indices.iter().zip(&counts) {
        if n >= 1 {
            support[idx] += 1.0;
        }
    }

    let denominator = match basis {
        Normalization::OccurrenceTotal => counts.iter().map(|&n| n as f64).sum::<f64>(),
        Normalization::SampleCount => y.len() as f64,
    };
    if denominator == 0.0 {
        warn!(operation = OP, ?basis, "normalizing support by zero");
    }

    Ok(support / denominator)
}

/// Fraction of samples whose two occurrence indicators disagree.
///
/// A sample counts when at least one indicator is positive and the two
/// differ. `classes` only validates `y`; it plays no part in the result.
///
/// # Errors
///
/// Returns `StatsError::InvalidElementType` for a bad label or occurrence,
/// and `StatsError::LengthMismatch` unless `y`, `occ1` and `occ2` have the
/// same length.
pub fn relative_support_difference<L, O>(
    classes: &[L],
    y: &[L],
    occ1: &[O],
    occ2: &[O],
) -> Result<f64, StatsError>
where
    L: Label,
    O: Occurrence,
{
    const OP: &str = "relative_support_difference";

    class_indices(classes, y, OP)?;
    let first = occurrence_counts(occ1, OP)?;
    let second = occurrence_counts(occ2, OP)?;
    check_length("y and occ1", y.len(), first.len(), OP)?;
    check_length("y and occ2", y.len(), second.len(), OP)?;

    let differing = first
        .iter()
        .zip(&second)
        .filter(|&(&a, &b)| (a > 0 || b > 0) && a != b)
        .count();

    Ok(differing as f64 / y.len() as f64)
}

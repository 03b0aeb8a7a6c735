//! Shows how the support measures report bad input.
//!
//! Run with `RUST_LOG=debug` to also see the validation events.

use bbrc_helpers::{StatsError, Value};
use support::{relative_support, relative_support_difference, relative_support_with, Normalization};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("Relative support error handling");
    println!("===============================");

    println!("\n1. Valid input:");
    match relative_support(&[3, 2, 1], &[1, 2, 1, 3], &[1, 1, 1, 0]) {
        Ok(support) => println!("   by occurrence total: {}", support),
        Err(e) => println!("   unexpected error: {}", e),
    }
    match relative_support_with(&[3, 2, 1], &[1, 2, 1, 3], &[1, 1, 1, 0], Normalization::SampleCount) {
        Ok(support) => println!("   by sample count:     {}", support),
        Err(e) => println!("   unexpected error: {}", e),
    }

    println!("\n2. A missing label:");
    let classes = [Value::from(1), Value::from(2), Value::from(3)];
    let y = [Value::from(1), Value::from(2), Value::from(1), Value::Missing];
    match relative_support(&classes, &y, &[1, 1, 1, 0]) {
        Ok(support) => println!("   support: {}", support),
        Err(StatsError::InvalidElementType(msg)) => println!("   rejected: {}", msg),
        Err(e) => println!("   other error: {}", e),
    }

    println!("\n3. Occurrence vectors of different length:");
    let y = ["active", "inactive", "active"];
    match relative_support_difference(&["active", "inactive"], &y, &[1, 0, 1], &[1, 1]) {
        Ok(diff) => println!("   difference: {}", diff),
        Err(e) => println!("   rejected ({:?}): {}", e.kind(), e),
    }

    println!("\n4. Propagating errors:");
    fn mean_difference() -> Result<f64, StatsError> {
        let y = ["a", "b", "a", "b"];
        let first = relative_support_difference(&["a", "b"], &y, &[1, 0, 1, 0], &[1, 1, 0, 0])?;
        let second = relative_support_difference(&["a", "b"], &y, &[0, 0, 1, 1], &[1, 1, 0, 0])?;
        Ok((first + second) / 2.0)
    }
    match mean_difference() {
        Ok(mean) => println!("   mean difference: {}", mean),
        Err(e) => println!("   failed: {}", e),
    }
}

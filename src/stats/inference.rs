//! Two-sample t-tests used to qualify group differences.
//!
//! The tests work from per-group sums and sums of squares so a caller that
//! already accumulated those (e.g. while computing group means) does not need
//! to keep the raw values around.

use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::stats::{TTestType, TestResult};

/// Perform a t-test comparing two samples.
///
/// This function performs either Student's t-test (assuming equal variances) or
/// Welch's t-test (allowing unequal variances) on two samples.
///
/// # Arguments
///
/// * `x` - First sample
/// * `y` - Second sample
/// * `test_type` - Type of t-test to perform
///
/// # Returns
///
/// `TestResult` containing the t-statistic and p-value. Samples with fewer than
/// two observations yield a statistic of 0 and a p-value of 1.
pub fn t_test(x: &[f64], y: &[f64], test_type: TTestType) -> TestResult {
    let (sum_x, sum_sq_x) = sums(x);
    let (sum_y, sum_sq_y) = sums(y);

    t_test_from_sums(
        sum_x,
        sum_sq_x,
        x.len() as f64,
        sum_y,
        sum_sq_y,
        y.len() as f64,
        test_type,
    )
}

/// Sum and sum of squares in one pass.
pub fn sums(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((0.0, 0.0), |(sum, sum_sq), &v| (sum + v, sum_sq + v * v))
}

/// Perform a t-test using precomputed summary statistics.
///
/// # Arguments
///
/// * `sum1`, `sum_sq1`, `n1` - Sum, sum of squares, and count for group 1
/// * `sum2`, `sum_sq2`, `n2` - Sum, sum of squares, and count for group 2
/// * `test_type` - Type of t-test to perform (Student's or Welch's)
///
/// # Returns
///
/// `TestResult` with the t-statistic, two-sided p-value and degrees of freedom.
pub fn t_test_from_sums(
    sum1: f64,
    sum_sq1: f64,
    n1: f64,
    sum2: f64,
    sum_sq2: f64,
    n2: f64,
    test_type: TTestType,
) -> TestResult {
    if n1 < 2.0 || n2 < 2.0 {
        return TestResult::new(0.0, 1.0);
    }

    let mean1 = sum1 / n1;
    let mean2 = sum2 / n2;

    // Computational formula; rounding can push a constant group slightly below zero.
    let var1 = ((sum_sq1 - sum1 * sum1 / n1) / (n1 - 1.0)).max(0.0);
    let var2 = ((sum_sq2 - sum2 * sum2 / n2) / (n2 - 1.0)).max(0.0);

    let mean_diff = mean1 - mean2;

    let (t_stat, df) = match test_type {
        TTestType::Student => {
            let pooled_var = ((n1 - 1.0) * var1 + (n2 - 1.0) * var2) / (n1 + n2 - 2.0);
            let std_err = (pooled_var * (1.0 / n1 + 1.0 / n2)).sqrt();
            (mean_diff / std_err, n1 + n2 - 2.0)
        }
        TTestType::Welch => {
            let term1 = var1 / n1;
            let term2 = var2 / n2;
            let combined_var = term1 + term2;
            let t = mean_diff / combined_var.sqrt();

            // Welch-Satterthwaite
            let df = combined_var * combined_var
                / (term1 * term1 / (n1 - 1.0) + term2 * term2 / (n2 - 1.0));
            (t, df)
        }
    };

    TestResult::new(t_stat, two_sided_p_value(t_stat, df)).with_degrees_of_freedom(df)
}

fn two_sided_p_value(t_stat: f64, df: f64) -> f64 {
    // Zero within-group variance: a non-zero difference is certain, no difference is not.
    if t_stat.is_nan() {
        return 1.0;
    }
    if t_stat.is_infinite() {
        return 0.0;
    }

    if !df.is_finite() || df <= 0.0 {
        return 1.0;
    }

    match StudentsT::new(0.0, 1.0, df) {
        Ok(dist) => (2.0 * dist.sf(t_stat.abs())).min(1.0),
        Err(_) => 1.0,
    }
}

//! Exponential moving average smoothing.

/// Smooth `values` with decay factor `alpha` in `[0, 1)`.
///
/// `out[0] = values[0]` and `out[i] = alpha * out[i - 1] + (1 - alpha) * values[i]`.
/// An `alpha` of zero returns the input unchanged. Callers pass non-empty
/// series; an empty slice yields an empty result.
pub fn exponential_moving_average(values: &[f64], alpha: f64) -> Vec<f64> {
    debug_assert!((0.0..1.0).contains(&alpha), "alpha out of range: {alpha}");

    let mut out = Vec::with_capacity(values.len());
    let mut iter = values.iter().copied();
    let Some(first) = iter.next() else {
        return out;
    };

    let mut last = first;
    out.push(last);
    for value in iter {
        last = alpha * last + (1.0 - alpha) * value;
        out.push(last);
    }
    out
}

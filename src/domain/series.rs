//! Column primitives shared by the indicators.
//!
//! Every rolling function returns a vector the same length as its input.
//! Output is NaN until the window is fully populated, and NaN whenever the
//! window contains a NaN. A zero window yields an all-NaN column.

/// Apply `f` to each full trailing window of `values`.
pub fn rolling<F>(values: &[f64], window: usize, f: F) -> Vec<f64>
where
    F: Fn(&[f64]) -> f64,
{
    let mut out = vec![f64::NAN; values.len()];
    if window == 0 || window > values.len() {
        return out;
    }
    for end in window..=values.len() {
        let slice = &values[end - window..end];
        if slice.iter().any(|v| v.is_nan()) {
            continue;
        }
        out[end - 1] = f(slice);
    }
    out
}

pub fn rolling_sum(values: &[f64], window: usize) -> Vec<f64> {
    rolling(values, window, |w| w.iter().sum())
}

pub fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    rolling(values, window, mean)
}

/// Sample standard deviation (n - 1 denominator). A one-bar window is NaN.
pub fn rolling_std(values: &[f64], window: usize) -> Vec<f64> {
    rolling(values, window, |w| {
        if w.len() < 2 {
            return f64::NAN;
        }
        if is_flat(w) {
            return 0.0;
        }
        let m = mean(w);
        let var = w.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (w.len() - 1) as f64;
        var.sqrt()
    })
}

pub fn rolling_max(values: &[f64], window: usize) -> Vec<f64> {
    rolling(values, window, |w| {
        w.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    })
}

pub fn rolling_min(values: &[f64], window: usize) -> Vec<f64> {
    rolling(values, window, |w| w.iter().copied().fold(f64::INFINITY, f64::min))
}

/// Mean absolute deviation around the window mean.
pub fn rolling_mad(values: &[f64], window: usize) -> Vec<f64> {
    rolling(values, window, |w| {
        if is_flat(w) {
            return 0.0;
        }
        let m = mean(w);
        w.iter().map(|v| (v - m).abs()).sum::<f64>() / w.len() as f64
    })
}

/// Bars elapsed since the highest value in the window; ties go to the most recent.
pub fn rolling_bars_since_max(values: &[f64], window: usize) -> Vec<f64> {
    rolling(values, window, |w| {
        let mut best = 0;
        for (age, v) in w.iter().rev().enumerate() {
            if *v > w[w.len() - 1 - best] {
                best = age;
            }
        }
        best as f64
    })
}

/// Bars elapsed since the lowest value in the window; ties go to the most recent.
pub fn rolling_bars_since_min(values: &[f64], window: usize) -> Vec<f64> {
    rolling(values, window, |w| {
        let mut best = 0;
        for (age, v) in w.iter().rev().enumerate() {
            if *v < w[w.len() - 1 - best] {
                best = age;
            }
        }
        best as f64
    })
}

/// Exponential moving average with `alpha = 2 / (span + 1)`.
///
/// Seeded by the first finite value with no bias adjustment, so there is no
/// warm-up beyond leading NaN inputs. An interior NaN carries the previous
/// average forward.
pub fn ema(values: &[f64], span: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; values.len()];
    if span == 0 {
        return out;
    }
    let alpha = 2.0 / (span as f64 + 1.0);
    let mut prev: Option<f64> = None;
    for (i, &v) in values.iter().enumerate() {
        let next = match (prev, v.is_nan()) {
            (None, true) => continue,
            (None, false) => v,
            (Some(p), true) => p,
            (Some(p), false) => alpha * v + (1.0 - alpha) * p,
        };
        out[i] = next;
        prev = Some(next);
    }
    out
}

/// `values[i] - values[i - 1]`; the first element is NaN.
pub fn diff(values: &[f64]) -> Vec<f64> {
    let mut out = vec![f64::NAN; values.len()];
    for i in 1..values.len() {
        out[i] = values[i] - values[i - 1];
    }
    out
}

/// Move values `periods` rows later (negative moves them earlier), filling with NaN.
pub fn shift(values: &[f64], periods: isize) -> Vec<f64> {
    let len = values.len();
    let mut out = vec![f64::NAN; len];
    for (i, slot) in out.iter_mut().enumerate() {
        let src = i as isize - periods;
        if src >= 0 && (src as usize) < len {
            *slot = values[src as usize];
        }
    }
    out
}

/// Element-wise combination of two equal-length columns.
pub fn zip_with<F>(a: &[f64], b: &[f64], f: F) -> Vec<f64>
where
    F: Fn(f64, f64) -> f64,
{
    a.iter().zip(b).map(|(&x, &y)| f(x, y)).collect()
}

/// Running sum; NaN inputs contribute nothing.
pub fn cumsum(values: &[f64]) -> Vec<f64> {
    let mut total = 0.0;
    values
        .iter()
        .map(|v| {
            if !v.is_nan() {
                total += v;
            }
            total
        })
        .collect()
}

/// Summing a repeated non-dyadic value drifts, so flat windows return the
/// value itself.
fn mean(w: &[f64]) -> f64 {
    match w.first() {
        Some(&first) if is_flat(w) => first,
        _ => w.iter().sum::<f64>() / w.len() as f64,
    }
}

fn is_flat(w: &[f64]) -> bool {
    w.windows(2).all(|pair| pair[0] == pair[1])
}

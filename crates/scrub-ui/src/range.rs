//! Value range resolution: bounds, the auto-computed drag increment,
//! and the shared "general" number formatting.

/// Resolved bounds and increment for a scrubber. Either bound may be
/// absent; when both are present, `low <= high`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueRange {
    pub low: Option<f64>,
    pub high: Option<f64>,
    pub increment: f64,
}

impl ValueRange {
    /// Resolve the effective increment. An explicitly configured
    /// positive increment always wins. Otherwise the step is 1 when a
    /// bound is missing or the value is integer-constrained, else a
    /// power of ten sized so roughly 100 steps traverse the range.
    pub fn resolve(
        low: Option<f64>,
        high: Option<f64>,
        configured_increment: f64,
        integral: bool,
    ) -> Self {
        let increment = if configured_increment > 0.0 {
            configured_increment
        } else {
            match (low, high) {
                (Some(lo), Some(hi)) if !integral && hi - lo > 0.0 => {
                    10f64.powf(((hi - lo) / 100.0).log10().round())
                }
                _ => 1.0,
            }
        };
        Self {
            low,
            high,
            increment,
        }
    }

    /// Clip a value to whichever bounds exist. Idempotent.
    pub fn clamp(&self, value: f64) -> f64 {
        let mut v = value;
        if let Some(lo) = self.low {
            v = v.max(lo);
        }
        if let Some(hi) = self.high {
            v = v.min(hi);
        }
        v
    }

    /// Tooltip describing the range: `[low..]`, `[..high]`,
    /// `[low..high]`, or empty when unbounded.
    pub fn tooltip(&self) -> String {
        match (self.low, self.high) {
            (Some(lo), Some(hi)) => {
                format!("[{}..{}]", display_number(lo), display_number(hi))
            }
            (Some(lo), None) => format!("[{}..]", display_number(lo)),
            (None, Some(hi)) => format!("[..{}]", display_number(hi)),
            (None, None) => String::new(),
        }
    }
}

/// General-format a number for display: 6 significant digits, trailing
/// zeros trimmed, scientific notation outside `1e-4..1e6`.
pub fn display_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return format!("{value}");
    }
    let exp = value.abs().log10().floor() as i32;
    if (-4..6).contains(&exp) {
        let prec = (5 - exp).max(0) as usize;
        trim_trailing_zeros(format!("{value:.prec$}"))
    } else {
        let formatted = format!("{value:.5e}");
        match formatted.split_once('e') {
            Some((mantissa, e)) => {
                format!("{}e{e}", trim_trailing_zeros(mantissa.to_string()))
            }
            None => formatted,
        }
    }
}

fn trim_trailing_zeros(mut s: String) -> String {
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    s
}

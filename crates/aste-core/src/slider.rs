// Dual-handle price range slider for the search form.
//
// The slider owns the two numeric inputs (`#id_prezzo_min`,
// `#id_prezzo_max`) and the two displays (`#min-value-display`,
// `#max-value-display`). Every update writes both inputs and the minimum
// display. The maximum display shows the range maximum painted at load and is
// never touched again.

/// Distance between adjacent stops.
pub const STEP: i64 = 10;

/// Range maximum when `data-max-price` is missing or unusable.
pub const DEFAULT_MAX_PRICE: i64 = 1000;

/// Largest accepted `data-max-price`. Larger values are treated as unusable.
pub const MAX_PRICE_LIMIT: i64 = 1_000_000_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    Low,
    High,
}

impl Handle {
    pub fn other(self) -> Self {
        match self {
            Handle::Low => Handle::High,
            Handle::High => Handle::Low,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceSlider {
    range_max: i64,
    low: i64,
    high: i64,
    /// `#id_prezzo_min` value.
    pub min_input: String,
    /// `#id_prezzo_max` value.
    pub max_input: String,
    /// `#min-value-display` text.
    pub min_display: String,
    /// `#max-value-display` text.
    pub max_display: String,
}

impl PriceSlider {
    /// Build the slider from the raw `data-max-price` attribute and the raw
    /// values of the two inputs (empty when the search form was not used).
    pub fn mount(max_price: Option<&str>, min_input: &str, max_input: &str) -> Self {
        let range_max = parse_max_price(max_price);
        let initial_min = parse_start(min_input).unwrap_or(0.0);
        let initial_max = parse_start(max_input).unwrap_or(range_max as f64);

        let mut slider = Self {
            range_max,
            low: 0,
            high: range_max,
            min_input: min_input.to_string(),
            max_input: max_input.to_string(),
            min_display: js_round(initial_min).to_string(),
            max_display: range_max.to_string(),
        };
        slider.low = slider.snap(initial_min);
        slider.high = slider.snap(initial_max).max(slider.low);
        slider.fire_update();
        slider
    }

    pub fn range_max(&self) -> i64 {
        self.range_max
    }

    pub fn value(&self, handle: Handle) -> i64 {
        match handle {
            Handle::Low => self.low,
            Handle::High => self.high,
        }
    }

    /// Tooltip text above a handle.
    pub fn tooltip(&self, handle: Handle) -> String {
        self.value(handle).to_string()
    }

    /// Move a handle to the stop nearest `value`. A handle cannot pass the
    /// other one.
    pub fn drag(&mut self, handle: Handle, value: f64) {
        let snapped = self.snap(value);
        match handle {
            Handle::Low => self.low = snapped.min(self.high),
            Handle::High => self.high = snapped.max(self.low),
        }
        self.fire_update();
    }

    /// Move a handle by whole steps.
    pub fn nudge(&mut self, handle: Handle, steps: i64) {
        let target = self.value(handle).saturating_add(steps.saturating_mul(STEP));
        self.drag(handle, target as f64);
    }

    fn fire_update(&mut self) {
        self.min_input = self.low.to_string();
        self.max_input = self.high.to_string();
        self.min_display = self.low.to_string();
    }

    /// Nearest stop to `value`. Stops are the multiples of `STEP` in range
    /// plus the range maximum itself.
    fn snap(&self, value: f64) -> i64 {
        if !value.is_finite() {
            return 0;
        }
        let clamped = value.clamp(0.0, self.range_max as f64);
        let stepped = js_round(clamped / STEP as f64)
            .saturating_mul(STEP)
            .min(self.range_max);
        let to_max = self.range_max as f64 - clamped;
        if to_max < (clamped - stepped as f64).abs() {
            self.range_max
        } else {
            stepped
        }
    }
}

/// Round half up, like `Math.round`.
fn js_round(x: f64) -> i64 {
    (x + 0.5).floor() as i64
}

/// Parse the leading integer of `data-max-price`. Missing, non-numeric, zero,
/// negative or oversized values fall back to `DEFAULT_MAX_PRICE`.
pub fn parse_max_price(raw: Option<&str>) -> i64 {
    let Some(raw) = raw else {
        return DEFAULT_MAX_PRICE;
    };
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    match digits[..end].parse::<i64>() {
        Ok(n) if n > 0 && n <= MAX_PRICE_LIMIT && !negative => n,
        _ => DEFAULT_MAX_PRICE,
    }
}

/// Parse an input's raw value as a start position. Empty means "not set".
fn parse_start(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

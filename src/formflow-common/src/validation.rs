//! Field validation rules.
//!
//! Every rule produces a tri-state [`Validity`]: empty input is
//! `Unknown` (no indicator shown), anything else is `Valid` or
//! `Invalid`. Rules never fail; a pattern that does not match is an
//! `Invalid` result, not an error.

use regex::Regex;

/// Default pattern for email fields (loose RFC shape).
const DEFAULT_EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// Default pattern for URL fields (permissive, scheme optional).
const DEFAULT_URL_PATTERN: &str = r"^(https?://)?(www\.)?[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}(/\S*)?$";

/// Outcome of a local validation rule.
///
/// Distinct from an externally supplied field error: validity drives
/// the inline indicator only and never blocks the value from
/// propagating upward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Validity {
    /// Nothing to report (empty input, or no rule configured)
    #[default]
    Unknown,
    /// The value satisfies the rule
    Valid,
    /// The value fails the rule
    Invalid,
}

impl Validity {
    /// Returns true when an indicator should be rendered.
    pub fn is_known(&self) -> bool {
        !matches!(self, Validity::Unknown)
    }

    /// Collapse a boolean check into a validity.
    pub fn from_check(ok: bool) -> Self {
        if ok { Validity::Valid } else { Validity::Invalid }
    }
}

/// Kind of text field, selecting the default pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKind {
    /// Plain text: no default pattern, `Unknown` unless one is supplied
    Plain,
    /// Email shape
    Email,
    /// URL shape
    Url,
}

impl TextKind {
    fn default_pattern(&self) -> Option<&'static str> {
        match self {
            TextKind::Plain => None,
            TextKind::Email => Some(DEFAULT_EMAIL_PATTERN),
            TextKind::Url => Some(DEFAULT_URL_PATTERN),
        }
    }
}

/// Pattern rule for a text-like field.
///
/// An override pattern replaces the kind's default. A plain text field
/// with no override has no rule at all and always reports `Unknown`.
#[derive(Debug, Clone)]
pub struct TextRule {
    kind: TextKind,
    pattern: Option<Regex>,
}

impl TextRule {
    /// Create a rule with the kind's default pattern.
    pub fn new(kind: TextKind) -> Self {
        let pattern = kind
            .default_pattern()
            .map(|p| Regex::new(p).expect("default pattern is valid"));
        Self { kind, pattern }
    }

    /// Replace the default pattern with a caller-supplied one.
    ///
    /// An unparseable pattern is ignored and the default kept, matching
    /// the permissive contract: validation never turns into a fault.
    pub fn with_pattern(mut self, pattern: &str) -> Self {
        match Regex::new(pattern) {
            Ok(re) => self.pattern = Some(re),
            Err(err) => {
                tracing::warn!(%pattern, %err, "ignoring unparseable validation pattern");
            }
        }
        self
    }

    /// The kind this rule was built for.
    pub fn kind(&self) -> TextKind {
        self.kind
    }

    /// Evaluate the rule against the raw input.
    pub fn check(&self, value: &str) -> Validity {
        if value.is_empty() {
            return Validity::Unknown;
        }
        match &self.pattern {
            Some(re) => Validity::from_check(re.is_match(value)),
            None => Validity::Unknown,
        }
    }
}

/// Round a value to `precision` decimal places, half away from zero.
///
/// Precision 0 yields an integral value. Rounding (not truncation) is
/// what keeps repeated fractional steps from drifting.
pub fn round_to_precision(value: f64, precision: u8) -> f64 {
    let factor = 10f64.powi(precision as i32);
    (value * factor).round() / factor
}

/// Bounds and precision rule for a number field.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberRule {
    /// Inclusive minimum
    pub min: Option<f64>,
    /// Inclusive maximum
    pub max: Option<f64>,
    /// Step applied by the stepper (default 1)
    pub step: f64,
    /// Decimal places (0 = integer field)
    pub precision: u8,
}

impl NumberRule {
    /// Create a rule with the default step of 1 and integer precision.
    pub fn new() -> Self {
        Self {
            min: None,
            max: None,
            step: 1.0,
            precision: 0,
        }
    }

    /// Set the inclusive minimum.
    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Set the inclusive maximum.
    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Set the stepper increment.
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    /// Set the decimal precision.
    pub fn with_precision(mut self, precision: u8) -> Self {
        self.precision = precision;
        self
    }

    /// Parse raw input per the configured precision.
    ///
    /// The parsed value is brought to the configured precision before
    /// any bounds check: integer fields truncate the fraction, decimal
    /// fields round to their precision.
    pub fn parse(&self, raw: &str) -> Option<f64> {
        let value = raw.trim().parse::<f64>().ok()?;
        if !value.is_finite() {
            return None;
        }
        Some(if self.precision == 0 {
            value.trunc()
        } else {
            round_to_precision(value, self.precision)
        })
    }

    /// Check a parsed value against the bounds.
    pub fn check(&self, value: f64) -> Validity {
        let mut ok = true;
        if let Some(min) = self.min
            && value < min
        {
            ok = false;
        }
        if let Some(max) = self.max
            && value > max
        {
            ok = false;
        }
        Validity::from_check(ok)
    }

    /// Seed value used when stepping from an absent value.
    pub fn seed(&self) -> f64 {
        self.min.unwrap_or(0.0)
    }

    /// Step a value upward. No-op at the maximum.
    pub fn increment(&self, value: Option<f64>) -> f64 {
        let Some(current) = value else {
            return self.seed();
        };
        if let Some(max) = self.max
            && current >= max
        {
            return current;
        }
        self.clamp(round_to_precision(current + self.step, self.precision))
    }

    /// Step a value downward. No-op at the minimum.
    pub fn decrement(&self, value: Option<f64>) -> f64 {
        let Some(current) = value else {
            return self.seed();
        };
        if let Some(min) = self.min
            && current <= min
        {
            return current;
        }
        self.clamp(round_to_precision(current - self.step, self.precision))
    }

    /// Format a value for display at the configured precision.
    pub fn format(&self, value: f64) -> String {
        if self.precision == 0 {
            format!("{}", value as i64)
        } else {
            format!("{:.*}", self.precision as usize, value)
        }
    }

    fn clamp(&self, value: f64) -> f64 {
        let mut v = value;
        if let Some(min) = self.min {
            v = v.max(min);
        }
        if let Some(max) = self.max {
            v = v.min(max);
        }
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_rule_matches_spec_cases() {
        let rule = TextRule::new(TextKind::Email);
        assert_eq!(rule.check("user@example.com"), Validity::Valid);
        assert_eq!(rule.check("user@"), Validity::Invalid);
        assert_eq!(rule.check(""), Validity::Unknown);
    }

    #[test]
    fn url_rule_is_permissive_about_scheme() {
        let rule = TextRule::new(TextKind::Url);
        assert_eq!(rule.check("https://example.com"), Validity::Valid);
        assert_eq!(rule.check("www.example.com/path"), Validity::Valid);
        assert_eq!(rule.check("not a url"), Validity::Invalid);
    }

    #[test]
    fn plain_text_without_pattern_stays_unknown() {
        let rule = TextRule::new(TextKind::Plain);
        assert_eq!(rule.check("anything"), Validity::Unknown);
    }

    #[test]
    fn pattern_override_replaces_default() {
        let rule = TextRule::new(TextKind::Plain).with_pattern(r"^[a-zA-Z]+(?: [a-zA-Z]+)+$");
        assert_eq!(rule.check("Ada Lovelace"), Validity::Valid);
        assert_eq!(rule.check("Ada"), Validity::Invalid);
    }

    #[test]
    fn unparseable_override_keeps_default() {
        let rule = TextRule::new(TextKind::Email).with_pattern("([");
        assert_eq!(rule.check("user@example.com"), Validity::Valid);
    }

    #[test]
    fn integer_parse_truncates_fractions() {
        let rule = NumberRule::new();
        assert_eq!(rule.parse("42"), Some(42.0));
        assert_eq!(rule.parse("4.9"), Some(4.0));
        assert_eq!(rule.parse("x"), None);
        assert_eq!(rule.parse(""), None);
    }

    #[test]
    fn decimal_parse_rounds_to_precision() {
        let rule = NumberRule::new().with_precision(1);
        assert_eq!(rule.parse("2.45"), Some(2.5));
        assert_eq!(rule.parse("2.4"), Some(2.4));
    }

    #[test]
    fn bounds_check_flips_validity() {
        let rule = NumberRule::new().with_min(18.0).with_max(120.0);
        assert_eq!(rule.check(18.0), Validity::Valid);
        assert_eq!(rule.check(17.0), Validity::Invalid);
        assert_eq!(rule.check(121.0), Validity::Invalid);
    }

    #[test]
    fn stepper_is_noop_at_bounds() {
        let rule = NumberRule::new().with_min(18.0).with_max(120.0);
        assert_eq!(rule.increment(Some(120.0)), 120.0);
        assert_eq!(rule.decrement(Some(18.0)), 18.0);
    }

    #[test]
    fn stepper_seeds_from_min() {
        let rule = NumberRule::new().with_min(18.0).with_max(120.0);
        assert_eq!(rule.increment(None), 18.0);
        assert_eq!(rule.decrement(None), 18.0);

        let unbounded = NumberRule::new();
        assert_eq!(unbounded.increment(None), 0.0);
    }

    #[test]
    fn fractional_steps_do_not_drift() {
        let rule = NumberRule::new().with_step(0.1).with_precision(1);
        let mut v = Some(0.0);
        for _ in 0..3 {
            v = Some(rule.increment(v));
        }
        assert_eq!(v, Some(0.3));
    }

    #[test]
    fn round_to_precision_rounds_half_away() {
        assert_eq!(round_to_precision(2.45, 1), 2.5);
        assert_eq!(round_to_precision(2.444, 2), 2.44);
        assert_eq!(round_to_precision(2.6, 0), 3.0);
    }

    #[test]
    fn format_respects_precision() {
        assert_eq!(NumberRule::new().format(42.0), "42");
        assert_eq!(
            NumberRule::new().with_precision(2).format(1.5),
            "1.50"
        );
    }
}

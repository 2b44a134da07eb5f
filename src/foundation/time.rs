use crate::foundation::error::{TactusError, TactusResult};

/// A point or span in time, either raw milliseconds or a `[[H:]MM:]SS` expression.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum TimeValue {
    /// Plain milliseconds.
    Ms(f64),
    /// Clock-style expression such as `"0:02"` or `"1:00:05"`.
    Expr(String),
}

impl TimeValue {
    /// Milliseconds represented by this value.
    ///
    /// Invalid expressions quietly contribute `0`; [`Timeline::validate`] reports them.
    ///
    /// [`Timeline::validate`]: crate::Timeline::validate
    pub fn to_ms(&self) -> f64 {
        self.try_to_ms().unwrap_or(0.0)
    }

    /// Whether this value resolves without falling back to `0`.
    pub fn is_valid(&self) -> bool {
        self.try_to_ms().is_ok()
    }

    /// Like [`TimeValue::to_ms`] but rejects malformed expressions.
    pub fn try_to_ms(&self) -> TactusResult<f64> {
        match self {
            Self::Ms(ms) => Ok(*ms),
            Self::Expr(s) => TimeExpr::parse(s),
        }
    }
}

impl From<f64> for TimeValue {
    fn from(ms: f64) -> Self {
        Self::Ms(ms)
    }
}

impl From<i32> for TimeValue {
    fn from(ms: i32) -> Self {
        Self::Ms(f64::from(ms))
    }
}

impl From<&str> for TimeValue {
    fn from(expr: &str) -> Self {
        Self::Expr(expr.to_owned())
    }
}

impl From<String> for TimeValue {
    fn from(expr: String) -> Self {
        Self::Expr(expr)
    }
}

/// Parser for `[[H:]MM:]SS` clock expressions.
pub struct TimeExpr;

impl TimeExpr {
    /// Parse an expression into milliseconds.
    ///
    /// Components are read right to left as seconds, minutes, hours. Seconds may carry a
    /// decimal fraction; minutes and hours must be whole numbers.
    pub fn parse(s: &str) -> TactusResult<f64> {
        let s = s.trim();
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() > 3 {
            return Err(TactusError::time(format!(
                "'{s}' has more than three components"
            )));
        }

        let mut ms = 0.0;
        let mut unit_ms = 1000.0;
        for (i, part) in parts.iter().rev().enumerate() {
            let value = if i == 0 {
                parse_seconds(part)
            } else {
                parse_whole(part)
            }
            .ok_or_else(|| TactusError::time(format!("'{s}' is not [[H:]MM:]SS")))?;
            ms += value * unit_ms;
            unit_ms *= 60.0;
        }
        Ok(ms)
    }
}

fn parse_whole(part: &str) -> Option<f64> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse::<u64>().ok().map(|v| v as f64)
}

fn parse_seconds(part: &str) -> Option<f64> {
    match part.split_once('.') {
        None => parse_whole(part),
        Some((whole, frac)) => {
            if frac.is_empty() || !frac.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            parse_whole(whole)?;
            part.parse::<f64>().ok()
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/time.rs"]
mod tests;

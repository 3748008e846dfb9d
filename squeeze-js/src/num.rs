use core::hash::Hash;
use core::hash::Hasher;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use std::cmp::Ordering;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;

// This provides Eq for f64.
#[derive(Copy, Clone, Debug)]
pub struct JsNumber(pub f64);

impl JsNumber {
  /// Shortest round-tripping decimal digits and the exponent `n` such that
  /// the value is `0.DIGITS * 10^n`. Only meaningful for finite non-zero values.
  pub(crate) fn digits_and_exponent(self) -> (String, i32) {
    let repr = format!("{:e}", self.0.abs());
    let (mantissa, exp) = repr.split_once('e').unwrap_or((&repr, "0"));
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let exp: i32 = exp.parse().unwrap_or(0);
    (digits, exp + 1)
  }
}

/// Formats like the language's `Number.prototype.toString` with radix 10.
impl Display for JsNumber {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    let v = self.0;
    if v.is_nan() {
      return f.write_str("NaN");
    }
    if v == 0.0 {
      return f.write_str("0");
    }
    if v.is_infinite() {
      return f.write_str(if v < 0.0 { "-Infinity" } else { "Infinity" });
    }
    if v < 0.0 {
      f.write_str("-")?;
    }
    let (digits, n) = self.digits_and_exponent();
    let k = digits.len() as i32;
    if k <= n && n <= 21 {
      f.write_str(&digits)?;
      for _ in 0..(n - k) {
        f.write_str("0")?;
      }
      Ok(())
    } else if 0 < n && n <= 21 {
      let (int, frac) = digits.split_at(n as usize);
      write!(f, "{int}.{frac}")
    } else if -6 < n && n <= 0 {
      f.write_str("0.")?;
      for _ in 0..(-n) {
        f.write_str("0")?;
      }
      f.write_str(&digits)
    } else {
      let e = n - 1;
      let sign = if e < 0 { '-' } else { '+' };
      let (first, rest) = digits.split_at(1);
      if rest.is_empty() {
        write!(f, "{first}e{sign}{}", e.abs())
      } else {
        write!(f, "{first}.{rest}e{sign}{}", e.abs())
      }
    }
  }
}

impl PartialEq for JsNumber {
  fn eq(&self, other: &Self) -> bool {
    if self.0.is_nan() {
      return other.0.is_nan();
    };
    self.0.eq(&other.0)
  }
}

impl Eq for JsNumber {}

impl Ord for JsNumber {
  fn cmp(&self, other: &Self) -> Ordering {
    // Only NaNs cannot be compared, and we treat them as equal.
    self.0.partial_cmp(&other.0).unwrap_or(Ordering::Equal)
  }
}

impl PartialOrd for JsNumber {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl Hash for JsNumber {
  fn hash<H: Hasher>(&self, state: &mut H) {
    if !self.0.is_nan() {
      self.0.to_bits().hash(state);
    };
  }
}

// JSON has no NaN or Infinity, so those travel as their string forms.
impl Serialize for JsNumber {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    if self.0.is_finite() {
      serializer.serialize_f64(self.0)
    } else {
      serializer.serialize_str(&self.to_string())
    }
  }
}

impl<'de> Deserialize<'de> for JsNumber {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
      Num(f64),
      Str(String),
    }

    match Repr::deserialize(deserializer)? {
      Repr::Num(v) => Ok(JsNumber(v)),
      Repr::Str(s) => match s.as_str() {
        "NaN" => Ok(JsNumber(f64::NAN)),
        "Infinity" => Ok(JsNumber(f64::INFINITY)),
        "-Infinity" => Ok(JsNumber(f64::NEG_INFINITY)),
        other => Err(serde::de::Error::custom(format!(
          "invalid number literal `{other}`"
        ))),
      },
    }
  }
}

#[cfg(test)]
mod tests {
  use super::JsNumber;

  fn s(v: f64) -> String {
    JsNumber(v).to_string()
  }

  #[test]
  fn test_to_string() {
    assert_eq!(s(7.0), "7");
    assert_eq!(s(-0.0), "0");
    assert_eq!(s(0.5), "0.5");
    assert_eq!(s(-12.25), "-12.25");
    assert_eq!(s(1e21), "1e+21");
    assert_eq!(s(1e20), "100000000000000000000");
    assert_eq!(s(123456789e-15), "1.23456789e-7");
    assert_eq!(s(0.000001), "0.000001");
    assert_eq!(s(1.0 / 3.0), "0.3333333333333333");
    assert_eq!(s(f64::NAN), "NaN");
    assert_eq!(s(f64::NEG_INFINITY), "-Infinity");
  }

  #[test]
  fn test_serde_non_finite() {
    let json = serde_json::to_string(&JsNumber(f64::INFINITY)).unwrap();
    assert_eq!(json, "\"Infinity\"");
    let back: JsNumber = serde_json::from_str(&json).unwrap();
    assert_eq!(back, JsNumber(f64::INFINITY));
    let int: JsNumber = serde_json::from_str("42").unwrap();
    assert_eq!(int, JsNumber(42.0));
  }
}

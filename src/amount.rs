use std::fmt::Display;

use serde::{Serialize, Serializer};

const DECIMALS: usize = 2;
const SCALE: i64 = 100;

// Float columns in the activities CSV are always written with exactly two decimals, so we
// keep them as a count of hundredths instead of carrying an f64 into the writer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Amount = Amount(0);
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s: String = self.into();
        write!(f, "{}", s)
    }
}

impl From<i64> for Amount {
    fn from(hundredths: i64) -> Self {
        Amount(hundredths)
    }
}

// `{:.2}` rounds the stored binary value once, the same as printf's `%.2f`.
impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        let s = format!("{:.*}", DECIMALS, value);
        let digits = s.trim_start_matches('-');
        let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, "0"));

        // Only finite values reach this point; the reader drops the rest.
        let hundredths = int_part
            .parse::<i64>()
            .ok()
            .and_then(|i| i.checked_mul(SCALE))
            .zip(frac_part.parse::<i64>().ok())
            .map(|(i, f)| i + f)
            .unwrap_or(0);

        if s.starts_with('-') {
            Amount(-hundredths)
        } else {
            Amount(hundredths)
        }
    }
}

impl From<&Amount> for String {
    fn from(value: &Amount) -> Self {
        let sign = if value.0 < 0 { "-" } else { "" };
        let abs = value.0.unsigned_abs();
        format!(
            "{}{}.{:0width$}",
            sign,
            abs / SCALE as u64,
            abs % SCALE as u64,
            width = DECIMALS
        )
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let s: String = self.into();
        serializer.serialize_str(&s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marshal_amount() {
        let actual: String = (&Amount(123456)).into();
        assert_eq!(actual, "1234.56");

        let actual: String = (&Amount(5)).into();
        assert_eq!(actual, "0.05");

        let actual: String = (&Amount::ZERO).into();
        assert_eq!(actual, "0.00");

        let actual: String = (&Amount(-250)).into();
        assert_eq!(actual, "-2.50");
    }

    #[test]
    fn test_amount_from_float() {
        assert_eq!(Amount::from(1200.5), Amount(120050));
        assert_eq!(Amount::from(2.3), Amount(230));
        assert_eq!(Amount::from(0.004), Amount(0));
        assert_eq!(Amount::from(0.005), Amount(1));
        assert_eq!(Amount::from(-1.256), Amount(-126));
        assert_eq!(Amount::from(123.456789), Amount(12346));
        assert_eq!(Amount::from(-0.001), Amount(0));
    }

    #[test]
    fn test_amount_rounds_stored_value_once() {
        // Both sit just below the .xx5 boundary in binary.
        assert_eq!(Amount::from(0.015), Amount(1));
        assert_eq!(Amount::from(1.115), Amount(111));
        assert_eq!(Amount::from(0.015).to_string(), "0.01");
        assert_eq!(Amount::from(1.115).to_string(), "1.11");
        assert_eq!(Amount::from(-1.115).to_string(), "-1.11");
    }

    #[test]
    fn test_display_matches_string() {
        assert_eq!(Amount::from(1200.5).to_string(), "1200.50");
        assert_eq!(Amount::from(7.0).to_string(), "7.00");
    }
}

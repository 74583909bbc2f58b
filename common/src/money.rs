//! [`Money`]-related definitions.

use std::{fmt, iter::Sum, ops, str::FromStr};

use rust_decimal::{prelude::ToPrimitive as _, Decimal};
use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};

/// Non-negative amount of money in US dollars.
///
/// All the marketplace prices are quoted in a single currency, so no currency
/// conversion ever happens.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Money(Decimal);

impl Money {
    /// Zero [`Money`].
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// The largest representable [`Money`].
    ///
    /// Arithmetic on [`Money`] saturates at this value instead of
    /// overflowing.
    pub const MAX: Self = Self(Decimal::MAX);

    /// Creates a new [`Money`] if the provided `amount` is not negative.
    #[must_use]
    pub fn new(amount: Decimal) -> Option<Self> {
        (!amount.is_sign_negative() || amount.is_zero())
            .then(|| Self(amount.normalize()))
    }

    /// Returns the amount of this [`Money`].
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Indicates whether this [`Money`] is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl From<u32> for Money {
    fn from(dollars: u32) -> Self {
        Self(Decimal::from(dollars))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let int = self.0.is_integer().then(|| self.0.to_u128()).flatten();
        if let Some(int) = int {
            write!(f, "${int}")
        } else {
            write!(f, "${}", self.0.round_dp(2))
        }
    }
}

impl FromStr for Money {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('$').unwrap_or(s);
        if s.is_empty() {
            return Err("empty amount");
        }

        let amount = Decimal::from_str(s).map_err(|_| "invalid amount")?;
        Self::new(amount).ok_or("negative amount")
    }
}

impl ops::Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl ops::Mul<u32> for Money {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self::Output {
        Self(self.0.saturating_mul(Decimal::from(rhs)))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, ops::Add::add)
    }
}

impl Serialize for Money {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let amount = rust_decimal::serde::float::deserialize(deserializer)?;
        Self::new(amount)
            .ok_or_else(|| D::Error::custom("negative `Money` amount"))
    }
}

#[cfg(feature = "juniper")]
mod juniper {
    //! Module providing integration with [`juniper`] crate.

    use std::str::FromStr as _;

    use juniper::{graphql_scalar, InputValue, ScalarValue, Value};

    /// Non-negative amount of US dollars in `{major}.{minor}` format, where:
    /// - `major` is an integer;
    /// - `minor` is an optional integer.
    ///
    /// A leading `$` sign is accepted on input.
    #[graphql_scalar(with = Self, parse_token(String))]
    type Money = super::Money;

    impl Money {
        fn to_output<S: ScalarValue>(m: &Money) -> Value<S> {
            Value::scalar(m.amount().to_string())
        }

        fn from_input<S: ScalarValue>(
            input: &InputValue<S>,
        ) -> Result<Self, String> {
            input
                .as_string_value()
                .ok_or_else(|| {
                    format!(
                        "Cannot parse `Money` input scalar from \
                         non-string value: {input}",
                    )
                })
                .and_then(|s| {
                    Self::from_str(s).map_err(|e| {
                        format!("Cannot parse `Money` input scalar: {e}")
                    })
                })
        }
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use super::Money;

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn from_str() {
        assert_eq!(
            Money::from_str("123.45").unwrap(),
            Money::new(decimal("123.45")).unwrap(),
        );
        assert_eq!(Money::from_str("$20000").unwrap(), Money::from(20_000));
        assert_eq!(Money::from_str(" 0 ").unwrap(), Money::ZERO);

        assert!(Money::from_str("").is_err());
        assert!(Money::from_str("$").is_err());
        assert!(Money::from_str("-1").is_err());
        assert!(Money::from_str("12USD").is_err());
    }

    #[test]
    fn to_string() {
        assert_eq!(Money::from(85_900).to_string(), "$85900");
        assert_eq!(Money::new(decimal("123.00")).unwrap().to_string(), "$123");
        assert_eq!(
            Money::new(decimal("123.45")).unwrap().to_string(),
            "$123.45",
        );
    }

    #[test]
    fn arithmetic() {
        let total: Money = [Money::from(10) * 3, Money::from(5)]
            .into_iter()
            .sum();
        assert_eq!(total, Money::from(35));
        assert_eq!(std::iter::empty::<Money>().sum::<Money>(), Money::ZERO);
    }

    #[test]
    fn saturates_instead_of_overflowing() {
        let huge = Money::from_str("50000000000000000000000000000").unwrap();

        assert_eq!(huge * 2, Money::MAX);
        assert_eq!([huge, huge].into_iter().sum::<Money>(), Money::MAX);
        assert_eq!(Money::MAX + Money::from(1), Money::MAX);
    }

    #[test]
    fn rejects_negative() {
        assert!(Money::new(decimal("-0.01")).is_none());
        assert!(Money::new(decimal("-0")).is_some());
    }
}

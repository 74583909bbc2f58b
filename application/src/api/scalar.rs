//! Helpers for GraphQL scalars backed by textual domain values.

use std::{fmt, marker::PhantomData, str::FromStr};

use juniper::{
    GraphQLType, InputValue, ParseScalarResult, ParseScalarValue, ScalarToken,
    ScalarValue, Value,
};

/// Bridge between a GraphQL scalar newtype and the domain value it wraps,
/// for use in `#[graphql(with = ..)]` attributes.
///
/// The scalar is a string: it's rendered with the [`Display`] impl of the
/// `Dom`ain value and parsed with its [`FromStr`] impl, so the domain
/// validation rules are the GraphQL input rules as well.
///
/// [`Display`]: fmt::Display
#[derive(Debug)]
pub struct Text<Dom>(PhantomData<Dom>);

impl<Dom> Text<Dom> {
    /// Renders the domain value wrapped into the scalar `T`.
    pub fn to_output<T, S>(scalar: &T) -> Value<S>
    where
        Dom: fmt::Display,
        T: AsRef<Dom>,
        S: ScalarValue,
    {
        Value::scalar(scalar.as_ref().to_string())
    }

    /// Parses the scalar `T` from a string `input`.
    ///
    /// # Errors
    ///
    /// If the `input` is not a string, or is not a valid `Dom`ain value.
    pub fn from_input<T, S>(input: &InputValue<S>) -> Result<T, String>
    where
        Dom: FromStr,
        Dom::Err: fmt::Display,
        T: From<Dom> + GraphQLType<S, TypeInfo = ()>,
        S: ScalarValue,
    {
        let raw = input.as_string_value().ok_or_else(|| {
            rejection::<T, S>(format_args!("expected string, found {input}"))
        })?;
        raw.parse::<Dom>()
            .map(T::from)
            .map_err(|e| rejection::<T, S>(format_args!("\"{raw}\": {e}")))
    }

    /// Parses the provided [`ScalarToken`] as a string.
    ///
    /// # Errors
    ///
    /// If the token is not a string literal.
    pub fn parse_token<S: ScalarValue>(
        token: ScalarToken<'_>,
    ) -> ParseScalarResult<S> {
        <String as ParseScalarValue<S>>::from_str(token)
    }
}

/// Describes why an input of the scalar `T` was rejected.
fn rejection<T, S>(reason: fmt::Arguments<'_>) -> String
where
    T: GraphQLType<S, TypeInfo = ()>,
    S: ScalarValue,
{
    let name = T::name(&()).unwrap_or("scalar");
    format!("Invalid `{name}` input: {reason}")
}

#[cfg(test)]
mod spec {
    use juniper::{DefaultScalarValue, InputValue, Value};
    use service::domain;

    use crate::api::vehicle;

    use super::Text;

    type Make = Text<domain::vehicle::Make>;

    fn make(raw: &str) -> Result<vehicle::Make, String> {
        Make::from_input::<vehicle::Make, DefaultScalarValue>(
            &InputValue::scalar(raw.to_owned()),
        )
    }

    #[test]
    fn parses_with_domain_rules() {
        let bmw = make("BMW").unwrap();

        assert_eq!(
            Make::to_output::<_, DefaultScalarValue>(&bmw),
            Value::scalar("BMW".to_owned()),
        );
    }

    #[test]
    fn names_scalar_on_rejection() {
        let err = make(" BMW").unwrap_err();
        assert!(err.starts_with("Invalid `VehicleMake` input"), "{err}");

        let err = Make::from_input::<vehicle::Make, DefaultScalarValue>(
            &InputValue::scalar(42),
        )
        .unwrap_err();
        assert!(err.contains("expected string"), "{err}");
    }
}

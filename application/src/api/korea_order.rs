//! [`KoreaOrder`]-related definitions.

use common::DateTime;
use derive_more::{Display, From, Into};
use juniper::{
    graphql_object, GraphQLEnum, GraphQLInputObject, GraphQLScalar,
};
use service::{command, domain};
use uuid::Uuid;

use crate::{
    api::{self, order, user},
    AsError, Context, Error,
};

/// Request of a `User` to buy a product in Korea and ship it abroad.
#[derive(Clone, Debug, From, Into)]
pub struct KoreaOrder(domain::KoreaOrder);

/// Request of a `User` to buy a product in Korea and ship it abroad.
#[graphql_object(context = Context)]
impl KoreaOrder {
    /// Unique identifier of this `KoreaOrder`.
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Name of the requested product.
    pub fn product_name(&self) -> String {
        self.0.product.name.to_string()
    }

    /// Category of the requested product.
    pub fn product_type(&self) -> ProductType {
        self.0.product.kind.into()
    }

    /// Link to a shop page of the requested product.
    pub fn product_link(&self) -> Option<String> {
        self.0.product.link.as_ref().map(ToString::to_string)
    }

    /// Number of the product units to buy.
    pub fn quantity(&self) -> i32 {
        i32::try_from(self.0.quantity.get()).unwrap_or(i32::MAX)
    }

    /// Budget of the whole purchase.
    pub fn budget(&self) -> BudgetRange {
        self.0.budget.into()
    }

    /// Address to ship the purchase to.
    pub fn shipping_address(&self) -> String {
        self.0.shipping.address.to_string()
    }

    /// Country to ship the purchase to.
    pub fn destination_country(&self) -> String {
        self.0.shipping.country.to_string()
    }

    /// Preferred way of shipping.
    pub fn shipping_method(&self) -> ShippingMethod {
        self.0.shipping.method.into()
    }

    /// Additional notes of the `User`.
    pub fn notes(&self) -> Option<String> {
        self.0.notes.as_ref().map(ToString::to_string)
    }

    /// Phone number to contact the `User` by.
    pub fn contact_number(&self) -> String {
        self.0.contact_number.to_string()
    }

    /// Email to contact the `User` by.
    pub fn email(&self) -> user::Email {
        self.0.email.clone().into()
    }

    /// Current status of this `KoreaOrder`.
    pub fn status(&self) -> order::Status {
        self.0.status.into()
    }

    /// Carrier tracking number, once shipped.
    pub fn tracking_number(&self) -> Option<String> {
        self.0.tracking_number.as_ref().map(ToString::to_string)
    }

    /// `DateTime` when this `KoreaOrder` was requested.
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }
}

/// Unique identifier of a `KoreaOrder`.
#[derive(Clone, Copy, Debug, Display, From, GraphQLScalar, Into)]
#[from(domain::korea_order::Id)]
#[into(domain::korea_order::Id)]
#[graphql(name = "KoreaOrderId", transparent)]
pub struct Id(Uuid);

/// Category of a product requested in a `KoreaOrder`.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "KoreaProductType")]
pub enum ProductType {
    /// Phones, laptops and other electronics.
    Electronics,

    /// Spare parts of vehicles.
    AutoParts,

    /// Cosmetics.
    Cosmetics,

    /// Clothes and accessories.
    Fashion,

    /// Anything else.
    Other,
}

impl From<domain::korea_order::ProductType> for ProductType {
    fn from(kind: domain::korea_order::ProductType) -> Self {
        use domain::korea_order::ProductType as T;
        match kind {
            T::Electronics => Self::Electronics,
            T::AutoParts => Self::AutoParts,
            T::Cosmetics => Self::Cosmetics,
            T::Fashion => Self::Fashion,
            T::Other => Self::Other,
        }
    }
}

impl From<ProductType> for domain::korea_order::ProductType {
    fn from(kind: ProductType) -> Self {
        use ProductType as T;
        match kind {
            T::Electronics => Self::Electronics,
            T::AutoParts => Self::AutoParts,
            T::Cosmetics => Self::Cosmetics,
            T::Fashion => Self::Fashion,
            T::Other => Self::Other,
        }
    }
}

/// Budget range of a `KoreaOrder` in US dollars.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "KoreaOrderBudget")]
pub enum BudgetRange {
    /// Up to $1,000.
    #[graphql(name = "UP_TO_1000")]
    UpTo1000,

    /// From $1,000 to $5,000.
    #[graphql(name = "UP_TO_5000")]
    UpTo5000,

    /// From $5,000 to $10,000.
    #[graphql(name = "UP_TO_10000")]
    UpTo10000,

    /// Over $10,000.
    #[graphql(name = "OVER_10000")]
    Over10000,
}

impl From<domain::korea_order::BudgetRange> for BudgetRange {
    fn from(budget: domain::korea_order::BudgetRange) -> Self {
        use domain::korea_order::BudgetRange as B;
        match budget {
            B::UpTo1000 => Self::UpTo1000,
            B::UpTo5000 => Self::UpTo5000,
            B::UpTo10000 => Self::UpTo10000,
            B::Over10000 => Self::Over10000,
        }
    }
}

impl From<BudgetRange> for domain::korea_order::BudgetRange {
    fn from(budget: BudgetRange) -> Self {
        match budget {
            BudgetRange::UpTo1000 => Self::UpTo1000,
            BudgetRange::UpTo5000 => Self::UpTo5000,
            BudgetRange::UpTo10000 => Self::UpTo10000,
            BudgetRange::Over10000 => Self::Over10000,
        }
    }
}

/// Way a `KoreaOrder` is shipped.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "KoreaShippingMethod")]
pub enum ShippingMethod {
    /// Sea freight.
    Sea,

    /// Air freight.
    Air,

    /// Express delivery.
    Express,
}

impl From<domain::korea_order::ShippingMethod> for ShippingMethod {
    fn from(method: domain::korea_order::ShippingMethod) -> Self {
        use domain::korea_order::ShippingMethod as M;
        match method {
            M::Sea => Self::Sea,
            M::Air => Self::Air,
            M::Express => Self::Express,
        }
    }
}

impl From<ShippingMethod> for domain::korea_order::ShippingMethod {
    fn from(method: ShippingMethod) -> Self {
        match method {
            ShippingMethod::Sea => Self::Sea,
            ShippingMethod::Air => Self::Air,
            ShippingMethod::Express => Self::Express,
        }
    }
}

/// Purchase requested in Korea.
#[derive(Clone, Debug, GraphQLInputObject)]
#[graphql(name = "KoreaOrderInput")]
pub struct Input {
    /// Name of the product.
    pub product_name: String,

    /// Category of the product.
    pub product_type: ProductType,

    /// Link to a shop page of the product.
    pub product_link: Option<String>,

    /// Number of the product units. Defaults to one.
    pub quantity: Option<i32>,

    /// Budget of the whole purchase.
    pub budget: BudgetRange,

    /// Address to ship the purchase to.
    pub shipping_address: String,

    /// Country to ship the purchase to.
    pub destination_country: String,

    /// Preferred way of shipping. Defaults to `SEA`.
    pub shipping_method: Option<ShippingMethod>,

    /// Additional notes.
    pub notes: Option<String>,

    /// Phone number to contact by.
    pub contact_number: String,

    /// Email to contact by.
    pub email: user::Email,
}

impl Input {
    /// Converts this [`Input`] into a [`command::SubmitKoreaOrder`] of the
    /// provided [`domain::User`].
    ///
    /// # Errors
    ///
    /// With `INVALID_INPUT` code, if any of the free-form fields is invalid
    /// or the `quantity` is not positive.
    pub fn into_command(
        self,
        user_id: domain::user::Id,
    ) -> Result<command::SubmitKoreaOrder, Error> {
        let Self {
            product_name,
            product_type,
            product_link,
            quantity,
            budget,
            shipping_address,
            destination_country,
            shipping_method,
            notes,
            contact_number,
            email,
        } = self;

        let quantity = match quantity {
            None => Some(domain::cart::Quantity::ONE),
            Some(n) => u32::try_from(n)
                .ok()
                .and_then(domain::cart::Quantity::new),
        }
        .ok_or_else(|| Error::invalid_input("KoreaOrderInput.quantity"))?;

        Ok(command::SubmitKoreaOrder {
            user_id,
            product: domain::korea_order::Product {
                name: api::parse("KoreaOrderInput.productName", &product_name)?,
                kind: product_type.into(),
                link: api::parse_opt(
                    "KoreaOrderInput.productLink",
                    product_link.as_deref(),
                )?,
            },
            quantity,
            budget: budget.into(),
            shipping: domain::korea_order::Shipping {
                address: api::parse(
                    "KoreaOrderInput.shippingAddress",
                    &shipping_address,
                )?,
                country: api::parse(
                    "KoreaOrderInput.destinationCountry",
                    &destination_country,
                )?,
                method: shipping_method.unwrap_or(ShippingMethod::Sea).into(),
            },
            notes: api::parse_opt("KoreaOrderInput.notes", notes.as_deref())?,
            contact_number: api::parse(
                "KoreaOrderInput.contactNumber",
                &contact_number,
            )?,
            email: email.into(),
        })
    }
}

impl AsError for command::submit_korea_order::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
        }
    }
}

#[cfg(test)]
mod spec {
    use service::domain::{self, korea_order::ShippingMethod};

    use super::{BudgetRange, Input, ProductType};

    fn input() -> Input {
        Input {
            product_name: "Galaxy S24".into(),
            product_type: ProductType::Electronics,
            product_link: Some(String::new()),
            quantity: None,
            budget: BudgetRange::UpTo5000,
            shipping_address: "12 Harbour Rd".into(),
            destination_country: "Kenya".into(),
            shipping_method: None,
            notes: None,
            contact_number: "+254 700 000000".into(),
            email: domain::user::Email::new("jane@example.com")
                .unwrap()
                .into(),
        }
    }

    #[test]
    fn fills_defaults() {
        let cmd = input().into_command(domain::user::Id::new()).unwrap();

        assert_eq!(cmd.quantity.get(), 1);
        assert_eq!(cmd.shipping.method, ShippingMethod::Sea);
        assert_eq!(cmd.product.link, None);
    }

    #[test]
    fn rejects_non_positive_quantity() {
        let err = Input {
            quantity: Some(0),
            ..input()
        }
        .into_command(domain::user::Id::new())
        .unwrap_err();

        assert_eq!(err.code, "INVALID_INPUT");
    }
}

//! [`KoreaOrder`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(doc)]
use crate::domain::User;
use crate::domain::{cart, define_text, image, order, user};

/// Request of a [`User`] to buy a product in Korea and ship it abroad.
#[derive(Clone, Debug, PartialEq)]
pub struct KoreaOrder {
    /// ID of this [`KoreaOrder`].
    pub id: Id,

    /// ID of the [`User`] who requested this [`KoreaOrder`].
    pub user_id: user::Id,

    /// Requested [`Product`].
    pub product: Product,

    /// Number of the [`Product`] units to buy.
    pub quantity: cart::Quantity,

    /// [`BudgetRange`] of the whole purchase.
    pub budget: BudgetRange,

    /// [`Shipping`] details.
    pub shipping: Shipping,

    /// Additional notes of the [`User`], if any.
    pub notes: Option<Notes>,

    /// Phone number to contact the [`User`] by.
    pub contact_number: order::Phone,

    /// Email to contact the [`User`] by.
    pub email: user::Email,

    /// Current [`order::Status`] of this [`KoreaOrder`].
    pub status: order::Status,

    /// [`TrackingNumber`] of the shipment, once shipped.
    pub tracking_number: Option<TrackingNumber>,

    /// [`DateTime`] when this [`KoreaOrder`] was requested.
    pub created_at: CreationDateTime,
}

/// ID of a [`KoreaOrder`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Product requested in a [`KoreaOrder`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Product {
    /// [`ProductName`] of this [`Product`].
    pub name: ProductName,

    /// [`ProductType`] of this [`Product`].
    pub kind: ProductType,

    /// Link to a shop page of this [`Product`], if any.
    pub link: Option<ProductLink>,
}

/// Shipping details of a [`KoreaOrder`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Shipping {
    /// Address to ship the purchase to.
    pub address: order::Address,

    /// Country to ship the purchase to.
    pub country: Country,

    /// [`ShippingMethod`] preferred by the [`User`].
    pub method: ShippingMethod,
}

define_text! {
    #[doc = "Name of a [`Product`]."]
    struct ProductName;
}

define_text! {
    #[doc = "Destination country of a [`Shipping`]."]
    struct Country;
}

define_text! {
    #[doc = "Free-form notes attached to a [`KoreaOrder`]."]
    struct Notes;
}

define_text! {
    #[doc = "Carrier tracking number of a shipped [`KoreaOrder`]."]
    struct TrackingNumber;
}

/// Absolute HTTP(S) link to a shop page of a [`Product`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq, Serialize)]
#[as_ref(str)]
#[serde(transparent)]
pub struct ProductLink(String);

impl ProductLink {
    /// Creates a new [`ProductLink`] if the given `url` is an absolute
    /// HTTP(S) URL.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Option<Self> {
        let url = url.into();
        image::is_http_url(&url).then_some(Self(url))
    }
}

impl FromStr for ProductLink {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `ProductLink`")
    }
}

define_kind! {
    #[doc = "Category of a [`Product`]."]
    enum ProductType {
        #[doc = "Phones, laptops and other electronics."]
        Electronics = 1,

        #[doc = "Spare parts of vehicles."]
        AutoParts = 2,

        #[doc = "Cosmetics."]
        Cosmetics = 3,

        #[doc = "Clothes and accessories."]
        Fashion = 4,

        #[doc = "Anything else."]
        Other = 5,
    }
}

define_kind! {
    #[doc = "Budget range of a [`KoreaOrder`] in US dollars."]
    enum BudgetRange {
        #[doc = "Up to $1,000."]
        UpTo1000 = 1,

        #[doc = "From $1,000 to $5,000."]
        UpTo5000 = 2,

        #[doc = "From $5,000 to $10,000."]
        UpTo10000 = 3,

        #[doc = "Over $10,000."]
        Over10000 = 4,
    }
}

impl BudgetRange {
    /// Returns the `{min}-{max}` (or `{min}+`) label of this [`BudgetRange`].
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::UpTo1000 => "0-1000",
            Self::UpTo5000 => "1000-5000",
            Self::UpTo10000 => "5000-10000",
            Self::Over10000 => "10000+",
        }
    }

    /// Parses a [`BudgetRange`] from its [`label`].
    ///
    /// [`label`]: BudgetRange::label
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|b| b.label() == label)
    }
}

define_kind! {
    #[doc = "Way a [`KoreaOrder`] is shipped."]
    enum ShippingMethod {
        #[doc = "Sea freight."]
        Sea = 1,

        #[doc = "Air freight."]
        Air = 2,

        #[doc = "Express delivery."]
        Express = 3,
    }
}

/// [`DateTime`] when a [`KoreaOrder`] was requested.
pub type CreationDateTime = DateTimeOf<(KoreaOrder, unit::Creation)>;

#[cfg(test)]
mod spec {
    use super::{BudgetRange, ProductLink, ProductType};

    #[test]
    fn budget_labels() {
        for b in BudgetRange::ALL {
            assert_eq!(BudgetRange::from_label(b.label()), Some(*b));
        }
        assert_eq!(
            BudgetRange::from_label("10000+"),
            Some(BudgetRange::Over10000),
        );
        assert_eq!(BudgetRange::from_label("10000"), None);
    }

    #[test]
    fn product_link_must_be_http() {
        assert!(ProductLink::new("https://shop.example.kr/p/1").is_some());
        assert!(ProductLink::new("shop.example.kr").is_none());
    }

    #[test]
    fn product_type_parses_any_case() {
        assert_eq!(
            "autoparts".parse::<ProductType>().unwrap(),
            ProductType::AutoParts,
        );
    }
}

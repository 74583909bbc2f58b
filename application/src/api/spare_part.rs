//! [`SparePart`]-related definitions.

use common::{DateTime, Money};
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLInputObject, GraphQLScalar};
use service::{command, domain};

use crate::{
    api::{self, image, scalar},
    AsError, Context, Error,
};

/// A spare part offered on the marketplace.
#[derive(Clone, Debug, From, Into)]
pub struct SparePart(domain::SparePart);

/// A spare part offered on the marketplace.
#[graphql_object(context = Context)]
impl SparePart {
    /// Unique identifier of this `SparePart`.
    pub fn id(&self) -> Id {
        self.0.id.clone().into()
    }

    /// Name of this `SparePart`.
    pub fn name(&self) -> Name {
        self.0.name.clone().into()
    }

    /// Category of this `SparePart`.
    pub fn category(&self) -> String {
        self.0.category.to_string()
    }

    /// Price of this `SparePart`.
    pub fn price(&self) -> Money {
        self.0.price
    }

    /// Vehicle models this `SparePart` fits.
    pub fn compatibility(&self) -> Vec<String> {
        self.0.compatibility.iter().map(ToString::to_string).collect()
    }

    /// Description of this `SparePart`, if any.
    pub fn description(&self) -> Option<String> {
        self.0.description.as_ref().map(ToString::to_string)
    }

    /// Image of this `SparePart`, if any.
    pub fn image_url(&self) -> Option<image::Url> {
        self.0.image_url.clone().map(Into::into)
    }

    /// Indicator whether this `SparePart` is sold by the current `User`.
    pub async fn is_mine(&self, ctx: &Context) -> Result<bool, Error> {
        let my_id = ctx.try_current_session().await?.map(|s| s.user_id);
        Ok(my_id.is_some_and(|id| self.0.seller_id == Some(id.into())))
    }

    /// `DateTime` when this `SparePart` was listed.
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }
}

/// Unique identifier of a `SparePart`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "SparePartId",
    with = scalar::Text::<domain::spare_part::Id>,
)]
pub struct Id(domain::spare_part::Id);

/// Name of a `SparePart`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "SparePartName",
    with = scalar::Text::<domain::spare_part::Name>,
)]
pub struct Name(domain::spare_part::Name);

/// Details of a `SparePart` to list for sale.
#[derive(Clone, Debug, GraphQLInputObject)]
#[graphql(name = "SparePartInput")]
pub struct Input {
    /// Name of the `SparePart`.
    pub name: Name,

    /// Category of the `SparePart`, e.g. `Brakes`.
    pub category: String,

    /// Price of the `SparePart`.
    pub price: Money,

    /// Vehicle models the `SparePart` fits.
    pub compatibility: Option<Vec<String>>,

    /// Description of the `SparePart`.
    pub description: Option<String>,

    /// Image of the `SparePart`.
    pub image_url: Option<image::Url>,
}

impl Input {
    /// Converts this [`Input`] into a [`command::CreateSparePartListing`] of
    /// the provided seller.
    ///
    /// # Errors
    ///
    /// With `INVALID_INPUT` code, if any of the free-form fields is invalid.
    pub fn into_command(
        self,
        seller_id: domain::user::Id,
    ) -> Result<command::CreateSparePartListing, Error> {
        let Self {
            name,
            category,
            price,
            compatibility,
            description,
            image_url,
        } = self;

        Ok(command::CreateSparePartListing {
            seller_id,
            name: name.into(),
            category: api::parse("SparePartInput.category", &category)?,
            price,
            compatibility: compatibility
                .unwrap_or_default()
                .iter()
                .map(|c| api::parse("SparePartInput.compatibility", c))
                .collect::<Result<_, _>>()?,
            description: api::parse_opt(
                "SparePartInput.description",
                description.as_deref(),
            )?,
            image_url: image_url.map(Into::into),
        })
    }
}

impl AsError for command::create_spare_part_listing::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::delete_spare_part_listing::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::PartNotExists(_) => Some(SparePartError::NotExists.into()),
            Self::NotSeller(_) => Some(SparePartError::NotSeller.into()),
        }
    }
}

crate::define_error! {
    enum SparePartError {
        #[code = "SPARE_PART_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`SparePart` does not exist"]
        NotExists,

        #[code = "NOT_SELLER"]
        #[status = FORBIDDEN]
        #[message = "`SparePart` is sold by another `User`"]
        NotSeller,
    }
}

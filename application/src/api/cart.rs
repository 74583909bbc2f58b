//! [`Cart`]-related definitions.

use common::Money;
use derive_more::{From, Into};
use juniper::{
    graphql_object, GraphQLEnum, GraphQLInputObject, GraphQLObject,
};
use service::{command, domain};

use crate::{
    api::{self, image},
    AsError, Context, Error,
};

/// Shopping cart of the current `User`.
#[derive(Clone, Debug, From, Into)]
pub struct Cart(domain::Cart);

/// Shopping cart of the current `User`.
#[graphql_object(context = Context)]
impl Cart {
    /// Lines of this `Cart`, in the order they were added.
    pub fn lines(&self) -> Vec<Line> {
        self.0.lines().iter().cloned().map(Into::into).collect()
    }

    /// Total count of units in this `Cart`.
    pub fn units(&self) -> i32 {
        i32::try_from(self.0.units()).unwrap_or(i32::MAX)
    }

    /// Total price of this `Cart`.
    pub fn total(&self) -> Money {
        self.0.total()
    }
}

/// Single line of a `Cart`.
#[derive(Clone, Debug, From, Into)]
pub struct Line(domain::cart::Line);

/// Single line of a `Cart`.
#[graphql_object(name = "CartLine", context = Context)]
impl Line {
    /// Item of this `CartLine`.
    pub fn item(&self) -> Item {
        self.0.item.clone().into()
    }

    /// Name of the item.
    pub fn name(&self) -> &str {
        self.0.name.as_ref()
    }

    /// Price of a single unit of the item.
    pub fn unit_price(&self) -> Money {
        self.0.unit_price
    }

    /// Image of the item, if any.
    pub fn image(&self) -> Option<image::Url> {
        self.0.image.clone().map(Into::into)
    }

    /// Count of the item units.
    pub fn quantity(&self) -> i32 {
        i32::try_from(self.0.quantity.get()).unwrap_or(i32::MAX)
    }

    /// Price of all the item units.
    pub fn subtotal(&self) -> Money {
        self.0.subtotal()
    }
}

/// Kind of a `Cart` item.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "CartItemKind")]
pub enum ItemKind {
    /// `Vehicle`.
    Vehicle,

    /// `SparePart`.
    Part,
}

/// Item of a `Cart`.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(context = Context, name = "CartItem")]
pub struct Item {
    /// Kind of this item.
    pub kind: ItemKind,

    /// ID of this item.
    pub id: String,
}

impl From<domain::cart::Item> for Item {
    fn from(item: domain::cart::Item) -> Self {
        use domain::cart::Kind as K;

        let kind = match item.kind() {
            K::Vehicle => ItemKind::Vehicle,
            K::Part => ItemKind::Part,
        };
        Self {
            kind,
            id: item.id().to_owned(),
        }
    }
}

/// Reference to an item of a `Cart`.
#[derive(Clone, Debug, GraphQLInputObject)]
#[graphql(name = "CartItemInput")]
pub struct ItemInput {
    /// Kind of the item.
    pub kind: ItemKind,

    /// ID of the `Vehicle` or `SparePart`.
    pub id: String,
}

impl TryFrom<ItemInput> for domain::cart::Item {
    type Error = Error;

    fn try_from(input: ItemInput) -> Result<Self, Self::Error> {
        const FIELD: &str = "CartItemInput.id";

        Ok(match input.kind {
            ItemKind::Vehicle => Self::Vehicle(api::parse(FIELD, &input.id)?),
            ItemKind::Part => Self::Part(api::parse(FIELD, &input.id)?),
        })
    }
}

impl AsError for command::add_to_cart::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::ItemNotExists(_) => Some(CartError::ItemNotExists.into()),
        }
    }
}

crate::define_error! {
    enum CartError {
        #[code = "ITEM_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "Item doesn't exist"]
        ItemNotExists,
    }
}

//! [`Cart`] definitions.

use std::num::NonZeroU32;

use common::{define_kind, Money};
use derive_more::{Display, Into};

use crate::domain::{
    define_text, spare_part, vehicle, ImageUrl, SparePart, Vehicle,
};

/// Shopping cart of a single browsing session.
///
/// Lives in memory only and is never persisted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Cart {
    /// [`Line`]s of this [`Cart`] in the order they were added.
    lines: Vec<Line>,
}

impl Cart {
    /// Creates a new empty [`Cart`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns [`Line`]s of this [`Cart`] in the order they were added.
    #[must_use]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Returns the [`Line`] of the provided [`Item`], if any.
    #[must_use]
    pub fn line(&self, item: &Item) -> Option<&Line> {
        self.lines.iter().find(|l| &l.item == item)
    }

    /// Indicates whether this [`Cart`] has no [`Line`]s.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns the total number of units in this [`Cart`].
    #[must_use]
    pub fn units(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity.get())).sum()
    }

    /// Adds the provided [`Line`] to this [`Cart`].
    ///
    /// If a [`Line`] of the same [`Item`] is present already, its quantity is
    /// increased by the quantity of the provided [`Line`] instead.
    pub fn add(&mut self, line: Line) {
        let same = self.lines.iter_mut().find(|l| l.item == line.item);
        if let Some(existing) = same {
            existing.quantity = existing.quantity.saturating_add(line.quantity);
        } else {
            self.lines.push(line);
        }
    }

    /// Sets the quantity of the provided [`Item`] in this [`Cart`].
    ///
    /// Zero `quantity` removes the [`Line`] of the [`Item`] completely.
    ///
    /// Returns `false` if this [`Cart`] has no [`Line`] of the [`Item`].
    pub fn update_quantity(&mut self, item: &Item, quantity: u32) -> bool {
        let Some(quantity) = Quantity::new(quantity) else {
            return self.remove(item).is_some();
        };
        self.lines
            .iter_mut()
            .find(|l| &l.item == item)
            .map(|l| l.quantity = quantity)
            .is_some()
    }

    /// Removes the [`Line`] of the provided [`Item`] from this [`Cart`].
    pub fn remove(&mut self, item: &Item) -> Option<Line> {
        let pos = self.lines.iter().position(|l| &l.item == item)?;
        Some(self.lines.remove(pos))
    }

    /// Calculates the total price of this [`Cart`].
    ///
    /// Recalculated on every call.
    #[must_use]
    pub fn total(&self) -> Money {
        self.lines.iter().map(Line::subtotal).sum()
    }
}

/// Single line of a [`Cart`].
#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    /// [`Item`] of this [`Line`].
    pub item: Item,

    /// [`ItemName`] of the [`Item`].
    pub name: ItemName,

    /// Price of a single unit of the [`Item`].
    pub unit_price: Money,

    /// [`ImageUrl`] of the [`Item`], if any.
    pub image: Option<ImageUrl>,

    /// [`Quantity`] of the [`Item`].
    pub quantity: Quantity,
}

impl Line {
    /// Creates a new [`Line`] of the provided [`Vehicle`].
    #[must_use]
    pub fn of_vehicle(vehicle: &Vehicle, quantity: Quantity) -> Self {
        Self {
            item: Item::Vehicle(vehicle.id.clone()),
            name: ItemName::shortened(format!(
                "{} {} {}",
                vehicle.year, vehicle.make, vehicle.model,
            )),
            unit_price: vehicle.price,
            image: vehicle.image_url.clone(),
            quantity,
        }
    }

    /// Creates a new [`Line`] of the provided [`SparePart`].
    #[must_use]
    pub fn of_part(part: &SparePart, quantity: Quantity) -> Self {
        Self {
            item: Item::Part(part.id.clone()),
            name: ItemName(part.name.to_string()),
            unit_price: part.price,
            image: part.image_url.clone(),
            quantity,
        }
    }

    /// Returns [`Kind`] of the [`Item`] in this [`Line`].
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.item.kind()
    }

    /// Returns the price of all the units in this [`Line`].
    #[must_use]
    pub fn subtotal(&self) -> Money {
        self.unit_price * self.quantity.get()
    }
}

/// Item put into a [`Cart`].
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Item {
    /// [`Vehicle`] with the provided ID.
    ///
    /// [`Vehicle`]: crate::domain::Vehicle
    Vehicle(vehicle::Id),

    /// [`SparePart`] with the provided ID.
    ///
    /// [`SparePart`]: crate::domain::SparePart
    Part(spare_part::Id),
}

impl Item {
    /// Returns [`Kind`] of this [`Item`].
    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            Self::Vehicle(_) => Kind::Vehicle,
            Self::Part(_) => Kind::Part,
        }
    }

    /// Returns the ID of this [`Item`] as a string.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Vehicle(id) => id.as_ref(),
            Self::Part(id) => id.as_ref(),
        }
    }
}

define_kind! {
    #[doc = "Kind of an [`Item`] in a [`Cart`]."]
    enum Kind {
        #[doc = "[`Item::Vehicle`]."]
        Vehicle = 1,

        #[doc = "[`Item::Part`]."]
        Part = 2,
    }
}

define_text! {
    #[doc = "Name of an [`Item`] as displayed in a [`Cart`]."]
    struct ItemName;
}

impl ItemName {
    /// Creates a new [`ItemName`] out of the provided non-empty trimmed
    /// `name`, cutting it down to [`ItemName::MAX_LEN`].
    fn shortened(mut name: String) -> Self {
        if name.len() > Self::MAX_LEN {
            let mut end = Self::MAX_LEN;
            while !name.is_char_boundary(end) {
                end -= 1;
            }
            name.truncate(end);
            name.truncate(name.trim_end().len());
        }
        Self(name)
    }
}

/// Quantity of an [`Item`] in a [`Cart`]. Never zero.
#[derive(
    Clone, Copy, Debug, Display, Eq, Hash, Into, Ord, PartialEq, PartialOrd,
)]
pub struct Quantity(NonZeroU32);

impl Quantity {
    /// Single unit.
    pub const ONE: Self = Self(NonZeroU32::MIN);

    /// Creates a new [`Quantity`] if the provided `quantity` is not zero.
    #[must_use]
    pub const fn new(quantity: u32) -> Option<Self> {
        match NonZeroU32::new(quantity) {
            Some(q) => Some(Self(q)),
            None => None,
        }
    }

    /// Returns the number of units.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Adds two [`Quantity`]s, saturating at the numeric bound.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0.get()))
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use common::Money;

    use super::{Cart, Item, ItemName, Line, Quantity};

    fn vehicle(id: &str, price: u32, quantity: u32) -> Line {
        Line {
            item: Item::Vehicle(id.into()),
            name: ItemName::new(format!("Vehicle {id}")).unwrap(),
            unit_price: Money::from(price),
            image: None,
            quantity: Quantity::new(quantity).unwrap(),
        }
    }

    fn part(id: &str, price: u32) -> Line {
        Line {
            item: Item::Part(id.into()),
            name: ItemName::new(format!("Part {id}")).unwrap(),
            unit_price: Money::from(price),
            image: None,
            quantity: Quantity::ONE,
        }
    }

    #[test]
    fn adding_same_item_merges_quantities() {
        let mut cart = Cart::new();
        cart.add(vehicle("1", 100, 2));
        cart.add(vehicle("1", 100, 3));

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity.get(), 5);
        assert_eq!(cart.total(), Money::from(500));
    }

    #[test]
    fn total_of_huge_prices_saturates() {
        let mut line = vehicle("1", 0, 2);
        line.unit_price =
            Money::from_str("50000000000000000000000000000").unwrap();
        let mut cart = Cart::new();
        cart.add(line);
        cart.add(part("7", 25));

        assert_eq!(cart.lines()[0].subtotal(), Money::MAX);
        assert_eq!(cart.total(), Money::MAX);
    }

    #[test]
    fn adding_new_item_appends_line() {
        let mut cart = Cart::new();
        cart.add(vehicle("1", 100, 1));
        cart.add(part("7", 25));

        let ids: Vec<_> = cart.lines().iter().map(|l| l.item.id()).collect();
        assert_eq!(ids, ["1", "7"]);
        assert_eq!(cart.units(), 2);
    }

    #[test]
    fn vehicle_and_part_with_same_id_are_different_items() {
        let mut cart = Cart::new();
        cart.add(vehicle("1", 100, 1));
        cart.add(part("1", 25));

        assert_eq!(cart.lines().len(), 2);
    }

    #[test]
    fn zero_quantity_removes_line() {
        let mut cart = Cart::new();
        cart.add(vehicle("1", 20_000, 1));
        cart.add(part("2", 50));

        assert!(cart.update_quantity(&Item::Vehicle("1".into()), 0));
        assert!(cart.line(&Item::Vehicle("1".into())).is_none());
        assert_eq!(cart.total(), Money::from(50));
    }

    #[test]
    fn updates_quantity_in_place() {
        let mut cart = Cart::new();
        cart.add(part("2", 50));

        assert!(cart.update_quantity(&Item::Part("2".into()), 4));
        assert_eq!(cart.total(), Money::from(200));
        assert!(!cart.update_quantity(&Item::Part("3".into()), 4));
    }

    #[test]
    fn remove_is_unconditional() {
        let mut cart = Cart::new();
        cart.add(vehicle("1", 100, 9));

        assert!(cart.remove(&Item::Vehicle("1".into())).is_some());
        assert!(cart.remove(&Item::Vehicle("1".into())).is_none());
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Money::ZERO);
    }

    #[test]
    fn quantity_never_zero() {
        assert!(Quantity::new(0).is_none());
        assert_eq!(
            Quantity::new(u32::MAX)
                .unwrap()
                .saturating_add(Quantity::ONE)
                .get(),
            u32::MAX,
        );
    }

    #[test]
    fn shortens_long_item_names() {
        let long = ItemName::shortened(format!("2020 {} X5", "Ä".repeat(300)));
        let long: &str = long.as_ref();
        assert!(long.len() <= ItemName::MAX_LEN);
        assert!(long.starts_with("2020 Ä"));

        let short = ItemName::shortened("2020 BMW X5".into());
        assert_eq!(short.to_string(), "2020 BMW X5");
    }
}

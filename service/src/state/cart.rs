//! [`Cart`] state holders.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

use tokio::sync::watch;

use crate::domain::{self, cart, user};

/// Observable [`domain::Cart`].
///
/// Clones share the same [`domain::Cart`].
#[derive(Clone, Debug)]
pub struct Cart(Arc<watch::Sender<domain::Cart>>);

impl Cart {
    /// Creates a new empty [`Cart`].
    #[must_use]
    pub fn new() -> Self {
        Self(Arc::new(watch::Sender::new(domain::Cart::new())))
    }

    /// Returns a snapshot of the current [`domain::Cart`].
    #[must_use]
    pub fn snapshot(&self) -> domain::Cart {
        self.0.borrow().clone()
    }

    /// Subscribes to changes of this [`Cart`].
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<domain::Cart> {
        self.0.subscribe()
    }

    /// Adds the provided [`cart::Line`] to this [`Cart`].
    ///
    /// See [`domain::Cart::add()`] for details.
    pub fn add(&self, line: cart::Line) -> domain::Cart {
        self.0.send_modify(|c| c.add(line));
        self.snapshot()
    }

    /// Sets the quantity of the provided [`cart::Item`] in this [`Cart`].
    ///
    /// See [`domain::Cart::update_quantity()`] for details.
    pub fn update_quantity(
        &self,
        item: &cart::Item,
        quantity: u32,
    ) -> domain::Cart {
        _ = self.0.send_if_modified(|c| c.update_quantity(item, quantity));
        self.snapshot()
    }

    /// Removes the provided [`cart::Item`] from this [`Cart`].
    pub fn remove(&self, item: &cart::Item) -> domain::Cart {
        _ = self.0.send_if_modified(|c| c.remove(item).is_some());
        self.snapshot()
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

/// Registry of [`Cart`]s of [`User`]s, living as long as the process does.
///
/// [`User`]: domain::User
#[derive(Clone, Debug, Default)]
pub struct Carts(Arc<Mutex<HashMap<user::Id, Cart>>>);

impl Carts {
    /// Returns the [`Cart`] of the provided [`User`], creating an empty one
    /// if there is none yet.
    ///
    /// [`User`]: domain::User
    #[must_use]
    pub fn of(&self, user_id: user::Id) -> Cart {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(user_id)
            .or_default()
            .clone()
    }
}

#[cfg(test)]
mod spec {
    use common::Money;

    use crate::domain::{
        cart::{Item, ItemName, Line, Quantity},
        user,
    };

    use super::Carts;

    fn part(id: &str, price: u32) -> Line {
        Line {
            item: Item::Part(id.into()),
            name: ItemName::new("Oil filter").unwrap(),
            unit_price: Money::from(price),
            image: None,
            quantity: Quantity::ONE,
        }
    }

    #[test]
    fn notifies_subscribers() {
        let carts = Carts::default();
        let user = user::Id::new();
        let mut rx = carts.of(user).subscribe();

        _ = carts.of(user).add(part("1", 10));

        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().total(), Money::from(10));
    }

    #[test]
    fn skips_notification_when_nothing_changes() {
        let cart = Carts::default().of(user::Id::new());
        let mut rx = cart.subscribe();

        let snapshot = cart.remove(&Item::Part("missing".into()));

        assert!(snapshot.is_empty());
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn keeps_carts_of_users_apart() {
        let carts = Carts::default();
        let (alice, bob) = (user::Id::new(), user::Id::new());

        _ = carts.of(alice).add(part("1", 10));
        _ = carts.of(alice).add(part("1", 10));

        assert_eq!(carts.of(alice).snapshot().total(), Money::from(20));
        assert!(carts.of(bob).snapshot().is_empty());
    }
}

//! In-memory state holders.
//!
//! Each holder owns a single piece of state and notifies its subscribers on
//! every change, last write wins.

pub mod cart;
pub mod session;

pub use self::{
    cart::{Cart, Carts},
    session::{AuthState, Mirror},
};

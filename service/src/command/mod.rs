//! [`Command`] definition.

pub mod add_to_cart;
pub mod authorize_user_session;
pub mod create_spare_part_listing;
pub mod create_vehicle_listing;
pub mod delete_spare_part_listing;
pub mod delete_vehicle_listing;
pub mod place_order;
pub mod remove_from_cart;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;
pub mod submit_korea_order;
pub mod submit_kyc_verification;
pub mod submit_trade_in;
pub mod update_cart_quantity;
pub mod update_user_name;
pub mod upload_image;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    add_to_cart::AddToCart, authorize_user_session::AuthorizeUserSession,
    create_spare_part_listing::CreateSparePartListing,
    create_vehicle_listing::CreateVehicleListing,
    delete_spare_part_listing::DeleteSparePartListing,
    delete_vehicle_listing::DeleteVehicleListing, place_order::PlaceOrder,
    remove_from_cart::RemoveFromCart, sign_in::SignIn, sign_out::SignOut,
    sign_up::SignUp, submit_korea_order::SubmitKoreaOrder,
    submit_kyc_verification::SubmitKycVerification,
    submit_trade_in::SubmitTradeIn,
    update_cart_quantity::UpdateCartQuantity,
    update_user_name::UpdateUserName, upload_image::UploadImage,
};

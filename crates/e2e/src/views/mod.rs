//! Typed page objects.
//!
//! One type per screen, exposing only the elements and composite actions
//! valid there. Navigation actions hand over the next screen's view, so a
//! scenario can never click an element that isn't on the screen it believes
//! it is on.

mod auction;
mod chats;
mod contacts;
mod home;
mod login;

pub use auction::AuctionHouseView;
pub use chats::ChatsView;
pub use contacts::ContactsView;
pub use home::HomeView;
pub use login::LoginView;

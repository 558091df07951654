mod booking;
mod comment;
mod item;
mod request;
mod user;

pub use booking::{Booking, BookingSearchState, BookingStatus, NewBooking};
pub use comment::{Comment, NewComment};
pub use item::{Item, NewItem, UpdateItem};
pub use request::{ItemRequest, NewItemRequest};
pub use user::{NewUser, UpdateUser, User};

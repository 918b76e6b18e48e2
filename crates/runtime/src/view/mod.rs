//! Observer-side collaborators that turn stack events into presentable state.
//!
//! Each observer owns its [`Subscription`](crate::events::Subscription) and
//! cancels it when closed or dropped, so a torn-down view never keeps
//! receiving events.

mod grid;
mod toast;

pub use grid::{InventoryGridView, Tile, TileViewModel, ViewError};
pub use toast::{Toast, ToastFeed};

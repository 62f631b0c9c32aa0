//! UI Components
//!
//! Reusable Leptos components.

mod item_entry;
mod item_list;
mod notice_bar;
mod register_panel;

pub use item_entry::ItemEntry;
pub use item_list::ItemList;
pub use notice_bar::NoticeBar;
pub use register_panel::RegisterPanel;

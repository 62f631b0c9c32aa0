//! Item Entry Component
//!
//! One `.box-item` with its content and a delete affordance.
//! The click handler is bound once, when the row is created.

use leptos::prelude::*;

use crate::context::AppContext;
use crate::models::ItemRow;
use crate::store::{store_row_pending, use_app_store};

#[component]
pub fn ItemEntry(row: ItemRow) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    let ItemRow { id, content, .. } = row;
    let data_id = id.to_string();
    let pending_id = id.clone();
    let is_pending = move || store_row_pending(&store, &pending_id);
    let label_pending = is_pending.clone();

    view! {
        <div class="box-item" class:pending=is_pending data-id=data_id>
            <p>{content}</p>
            <button
                class="remove-btn"
                on:click=move |ev| {
                    ev.stop_propagation();
                    ctx.delete_item(id.clone());
                }
            >
                {move || if label_pending() { "Removing..." } else { "Remove" }}
            </button>
        </div>
    }
}

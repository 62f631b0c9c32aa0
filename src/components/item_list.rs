//! Item List Component
//!
//! Renders `AppState::rows` in order, one `ItemEntry` per row.

use leptos::prelude::*;

use crate::components::ItemEntry;
use crate::models::LoadState;
use crate::store::{store_load_state, store_rows, use_app_store};

#[component]
pub fn ItemList() -> impl IntoView {
    let store = use_app_store();
    let is_loading = move || store_load_state(&store) == LoadState::Loading;
    let is_empty = move || !is_loading() && store_rows(&store).is_empty();

    view! {
        <div id="items-container" class="items-container">
            <Show when=is_loading>
                <div class="loading">"Loading..."</div>
            </Show>

            <For
                each=move || store_rows(&store)
                key=|row| row.id.clone()
                children=move |row| view! { <ItemEntry row=row /> }
            />

            <Show when=is_empty>
                <p class="empty-list">"No books listed yet."</p>
            </Show>
        </div>
    }
}

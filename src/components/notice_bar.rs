//! Notice Bar Component
//!
//! Shows failed deletes with retry and dismiss actions.

use leptos::prelude::*;

use crate::context::AppContext;
use crate::models::Notice;
use crate::store::{store_notices, use_app_store};

#[component]
pub fn NoticeBar() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    view! {
        <div class="notice-bar">
            <For
                each=move || store_notices(&store)
                key=|notice| notice.id
                children=move |notice| {
                    let Notice { id, text, retry } = notice;
                    view! {
                        <div class="notice error">
                            <span class="notice-text">{text}</span>
                            {retry.map(|item_id| view! {
                                <button
                                    class="retry-btn"
                                    on:click=move |_| ctx.retry_delete(id, item_id.clone())
                                >
                                    "Retry delete"
                                </button>
                            })}
                            <button class="dismiss-btn" on:click=move |_| ctx.dismiss_notice(id)>
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}

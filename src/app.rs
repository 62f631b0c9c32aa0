//! Webook Frontend App
//!
//! Homepage item list plus the account registration panel.

use leptos::prelude::*;
use reactive_stores::Store;

use list_sync::{HttpRemote, ListSynchronizer};
use crate::components::{ItemList, NoticeBar, RegisterPanel};
use crate::config::load_config;
use crate::context::AppContext;
use crate::store::AppState;
use crate::surface::StoreSurface;
use crate::timer::GlooTimer;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Page {
    Items,
    Register,
}

#[component]
pub fn App() -> impl IntoView {
    let store = Store::new(AppState::new());
    provide_context(store);

    let config = load_config();
    let sync = ListSynchronizer::new(
        HttpRemote::new(&config),
        StoreSurface::new(store),
        GlooTimer,
        config,
    );
    let ctx = AppContext::new(sync, store);
    provide_context(ctx);

    let (page, set_page) = signal(Page::Items);

    // Load items once on mount
    Effect::new(move |_| {
        ctx.load_items();
    });

    view! {
        <div class="app-layout">
            <nav class="top-nav">
                <button
                    class=move || if page.get() == Page::Items { "nav-btn active" } else { "nav-btn" }
                    on:click=move |_| set_page.set(Page::Items)
                >
                    "Books"
                </button>
                <button
                    class=move || if page.get() == Page::Register { "nav-btn active" } else { "nav-btn" }
                    on:click=move |_| set_page.set(Page::Register)
                >
                    "Register"
                </button>
            </nav>

            <main class="main-content">
                <Show
                    when=move || page.get() == Page::Items
                    fallback=|| view! { <RegisterPanel /> }
                >
                    <h1>"Webook"</h1>
                    <NoticeBar />
                    <ItemList />
                </Show>
            </main>
        </div>
    }
}

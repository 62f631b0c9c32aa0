//! Register Panel Component
//!
//! Email + password registration, then code verification. The code input
//! unlocks after the backend accepts the registration.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands::{self, RegisterArgs, VerifyArgs};
use crate::context::AppContext;

#[component]
pub fn RegisterPanel() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (code, set_code) = signal(String::new());
    let (registered, set_registered) = signal(false);
    let (busy, set_busy) = signal(false);
    let (status, set_status) = signal::<Option<String>>(None);

    let on_register = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let args = match RegisterArgs::new(&email.get(), &password.get()) {
            Ok(args) => args,
            Err(msg) => {
                set_status.set(Some(msg.to_string()));
                return;
            }
        };
        let origin = ctx.origin();
        set_busy.set(true);
        spawn_local(async move {
            match commands::register(&origin, &args).await {
                Ok(reply) => {
                    if reply.success {
                        set_registered.set(true);
                    }
                    set_status.set(Some(reply.message));
                }
                Err(e) => {
                    log::error!("[Register] Request failed: {}", e);
                    set_status.set(Some("Registration request failed, please try again later.".to_string()));
                }
            }
            set_busy.set(false);
        });
    };

    let on_verify = move |_: web_sys::MouseEvent| {
        let args = match VerifyArgs::new(&email.get(), &code.get()) {
            Ok(args) => args,
            Err(msg) => {
                set_status.set(Some(msg.to_string()));
                return;
            }
        };
        let origin = ctx.origin();
        set_busy.set(true);
        spawn_local(async move {
            match commands::verify(&origin, &args).await {
                Ok(reply) => set_status.set(Some(reply.message)),
                Err(e) => {
                    log::error!("[Verify] Request failed: {}", e);
                    set_status.set(Some("Verification request failed, please try again later.".to_string()));
                }
            }
            set_busy.set(false);
        });
    };

    view! {
        <form class="register-form" on:submit=on_register>
            <h2>"Create an account"</h2>
            <input
                type="email"
                placeholder="Email address"
                prop:value=move || email.get()
                on:input=move |ev| set_email.set(event_target_value(&ev))
            />
            <input
                type="password"
                placeholder="Password"
                prop:value=move || password.get()
                on:input=move |ev| set_password.set(event_target_value(&ev))
            />
            <button type="submit" disabled=move || busy.get()>"Register"</button>

            <div class="verify-row">
                <input
                    type="text"
                    placeholder="Verification code"
                    disabled=move || !registered.get()
                    prop:value=move || code.get()
                    on:input=move |ev| set_code.set(event_target_value(&ev))
                />
                <button
                    type="button"
                    disabled=move || !registered.get() || busy.get()
                    on:click=on_verify
                >
                    "Verify"
                </button>
            </div>

            {move || status.get().map(|msg| view! { <p class="status-message">{msg}</p> })}
        </form>
    }
}

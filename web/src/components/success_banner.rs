use leptos::prelude::*;
use thaw::{MessageBar, MessageBarIntent};

#[component]
pub fn SuccessBanner(#[prop(into)] visible: Signal<bool>) -> impl IntoView {
    view! {
        <Show when=move || visible.get()>
            <div class="success-banner" role="status">
                <MessageBar intent=MessageBarIntent::Success>
                    "¡Pago realizado con éxito! Tu reservación ha sido confirmada."
                </MessageBar>
            </div>
        </Show>
    }
}

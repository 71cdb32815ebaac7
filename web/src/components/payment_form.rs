use leptos::prelude::*;
use leptos::web_sys::HtmlInputElement;
use shared_types::payment::{CARD_NUMBER_MAX_LEN, CVV_MAX_LEN, EXPIRY_MAX_LEN};
use shared_types::{PaymentField, PaymentFields};

/// Card number, expiry and CVV inputs.
///
/// The inputs are controlled by `payment`: after each keystroke the element is
/// rewritten with the sanitized value, so rejected characters never show up.
#[component]
pub fn PaymentForm(
    #[prop(into)] payment: Signal<PaymentFields>,
    on_change: impl Fn(PaymentField, String) + 'static + Copy + Send + Sync,
) -> impl IntoView {
    let field_value = move |field: PaymentField, fields: &PaymentFields| match field {
        PaymentField::CardNumber => fields.card_number().to_string(),
        PaymentField::Expiry => fields.expiry().to_string(),
        PaymentField::Cvv => fields.cvv().to_string(),
    };

    let handle_input = move |field: PaymentField, ev: leptos::ev::Event| {
        let input = event_target::<HtmlInputElement>(&ev);
        on_change(field, input.value());
        input.set_value(&payment.with_untracked(|p| field_value(field, p)));
    };

    view! {
        <div class="payment-fields">
            <div class="form-group">
                <label for="card-number">"Número de tarjeta"</label>
                <input
                    id="card-number"
                    class="form-input"
                    inputmode="numeric"
                    autocomplete="cc-number"
                    placeholder="XXXX XXXX XXXX XXXX"
                    maxlength={CARD_NUMBER_MAX_LEN.to_string()}
                    prop:value=move || payment.with(|p| field_value(PaymentField::CardNumber, p))
                    on:input=move |ev| handle_input(PaymentField::CardNumber, ev)
                />
            </div>
            <div class="form-group">
                <label for="expiry">"Vencimiento"</label>
                <input
                    id="expiry"
                    class="form-input"
                    autocomplete="cc-exp"
                    placeholder="MM/AA"
                    maxlength={EXPIRY_MAX_LEN.to_string()}
                    prop:value=move || payment.with(|p| field_value(PaymentField::Expiry, p))
                    on:input=move |ev| handle_input(PaymentField::Expiry, ev)
                />
            </div>
            <div class="form-group">
                <label for="cvv">"CVV"</label>
                <input
                    id="cvv"
                    class="form-input"
                    type="password"
                    inputmode="numeric"
                    autocomplete="cc-csc"
                    maxlength={CVV_MAX_LEN.to_string()}
                    prop:value=move || payment.with(|p| field_value(PaymentField::Cvv, p))
                    on:input=move |ev| handle_input(PaymentField::Cvv, ev)
                />
            </div>
        </div>
    }
}

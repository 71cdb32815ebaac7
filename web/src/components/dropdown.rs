use leptos::prelude::*;
use shared_types::SelectOption;
use thaw::{Flex, FlexAlign, Label};

#[component]
pub fn Dropdown(
    #[prop(into)] id: String,
    #[prop(into)] label: String,
    #[prop(into)] options: Signal<Vec<SelectOption>>,
    #[prop(into)] value: Signal<Option<String>>,
    on_change: impl Fn(Option<String>) + 'static + Copy + Send + Sync,
) -> impl IntoView {
    view! {
        <Flex vertical=true align=FlexAlign::Stretch class="dropdown">
            <Label>{label}</Label>
            <select
                id=id
                class="dropdown-select"
                on:change=move |ev| {
                    let selected = event_target_value(&ev);
                    on_change((!selected.is_empty()).then_some(selected));
                }
            >
                <option value="" prop:selected=move || value.get().is_none()>
                    "Selecciona una opción"
                </option>
                {move || {
                    let current = value.get();
                    options
                        .get()
                        .into_iter()
                        .map(|option| {
                            let is_selected = current.as_deref() == Some(option.value.as_str());
                            view! {
                                <option value=option.value prop:selected=is_selected>
                                    {option.label}
                                </option>
                            }
                        })
                        .collect_view()
                }}
            </select>
        </Flex>
    }
}

use crate::app_lib::theme::Theme;
use leptos::prelude::*;

/// Labelled input bound to a string signal.
#[component]
pub fn TextField(
    label: &'static str,
    value: RwSignal<String>,
    #[prop(optional)] input_type: Option<&'static str>,
    #[prop(optional)] required: bool,
    #[prop(optional)] placeholder: &'static str,
) -> impl IntoView {
    view! {
        <label class="block">
            <span class=Theme::LABEL>{label}</span>
            <input
                type=input_type.unwrap_or("text")
                class=Theme::INPUT
                required=required
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </label>
    }
}

/// Labelled select over fixed `(value, label)` options.
#[component]
pub fn SelectField(
    label: &'static str,
    value: RwSignal<String>,
    options: Vec<(&'static str, &'static str)>,
) -> impl IntoView {
    view! {
        <label class="block">
            <span class=Theme::LABEL>{label}</span>
            <select
                class=Theme::INPUT
                prop:value=move || value.get()
                on:change=move |ev| value.set(event_target_value(&ev))
            >
                {options
                    .into_iter()
                    .map(|(option, text)| view! { <option value=option>{text}</option> })
                    .collect_view()}
            </select>
        </label>
    }
}

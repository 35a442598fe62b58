use leptos::prelude::*;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Danger,
}

impl ButtonVariant {
    fn class(self) -> &'static str {
        match self {
            ButtonVariant::Primary => {
                "text-white bg-blue-700 hover:bg-blue-800 focus:ring-4 focus:outline-none focus:ring-blue-300 font-medium rounded-lg text-sm px-5 py-2.5 text-center dark:bg-blue-600 dark:hover:bg-blue-700"
            }
            ButtonVariant::Secondary => {
                "text-gray-900 bg-white border border-gray-200 hover:bg-gray-100 focus:ring-4 focus:outline-none focus:ring-gray-100 font-medium rounded-lg text-sm px-5 py-2.5 text-center dark:bg-gray-800 dark:text-gray-300 dark:border-gray-600"
            }
            ButtonVariant::Danger => {
                "text-white bg-red-600 hover:bg-red-700 focus:ring-4 focus:outline-none focus:ring-red-300 font-medium rounded-lg text-sm px-5 py-2.5 text-center"
            }
        }
    }
}

/// Button that shows `busy_label` and disables itself while `busy` is set.
#[component]
pub fn Button(
    #[prop(optional)] button_type: Option<&'static str>,
    #[prop(optional)] variant: ButtonVariant,
    #[prop(optional, into, default = Signal::from(false))] disabled: Signal<bool>,
    #[prop(optional, into, default = Signal::from(false))] busy: Signal<bool>,
    #[prop(optional)] busy_label: Option<&'static str>,
    #[prop(optional)] on_click: Option<Callback<()>>,
    children: ChildrenFn,
) -> impl IntoView {
    let button_type = button_type.unwrap_or("button");
    let inactive = move || disabled.get() || busy.get();

    view! {
        <button
            type=button_type
            class=variant.class()
            class:cursor-not-allowed=inactive
            class:opacity-70=inactive
            disabled=inactive
            on:click=move |_| {
                if let Some(on_click) = on_click {
                    on_click.run(());
                }
            }
        >
            {move || match (busy.get(), busy_label) {
                (true, Some(label)) => label.into_any(),
                _ => children().into_any(),
            }}
        </button>
    }
}

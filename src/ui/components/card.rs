//! Card surface.

use leptos::prelude::*;

#[component]
pub fn Card(
    /// Additional CSS classes.
    #[prop(default = "")]
    class: &'static str,
    children: Children,
) -> impl IntoView {
    let classes = format!(
        "rounded-xl border border-slate-200 dark:border-slate-800 bg-white dark:bg-slate-900 \
         text-slate-900 dark:text-white shadow-sm {class}"
    );

    view! {
        <div class=classes>
            {children()}
        </div>
    }
}

#[component]
pub fn CardHeader(children: Children) -> impl IntoView {
    view! {
        <div class="flex flex-col space-y-1.5 p-6">
            {children()}
        </div>
    }
}

#[component]
pub fn CardContent(
    #[prop(default = "")]
    class: &'static str,
    children: Children,
) -> impl IntoView {
    let classes = format!("p-6 pt-0 {class}");

    view! {
        <div class=classes>
            {children()}
        </div>
    }
}

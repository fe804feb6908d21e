//! Labelled input field.

use leptos::prelude::*;

const INPUT_CLASSES: &str = "flex h-10 w-full rounded-lg border border-slate-300 \
                             dark:border-slate-700 bg-white dark:bg-slate-900 px-3 py-2 text-sm \
                             text-slate-900 dark:text-white placeholder:text-slate-400 \
                             focus-visible:outline-none focus-visible:ring-2 \
                             focus-visible:ring-slate-400";

/// Text input with a label above it.
///
/// # Example
///
/// ```rust,ignore
/// view! {
///     <Field label="Email" name="email" input_type="email" autocomplete="email"/>
/// }
/// ```
#[component]
pub fn Field(
    label: &'static str,
    /// Input name and id.
    name: &'static str,
    /// Input type (text, email, password, etc.).
    #[prop(default = "text")]
    input_type: &'static str,
    /// Hint text; omitted from the markup when not given.
    #[prop(optional)]
    placeholder: Option<&'static str>,
    #[prop(default = "off")]
    autocomplete: &'static str,
    #[prop(default = true)]
    required: bool,
) -> impl IntoView {
    view! {
        <label for=name class="block space-y-1.5">
            <span class="text-sm font-medium text-slate-700 dark:text-slate-300">{label}</span>
            <input
                type=input_type
                id=name
                name=name
                placeholder=placeholder
                autocomplete=autocomplete
                required=required
                class=INPUT_CLASSES
            />
        </label>
    }
}

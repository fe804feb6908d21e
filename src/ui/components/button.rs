//! Button component with variants.

use leptos::prelude::*;

/// Button visual variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonVariant {
    /// Solid slate, inverted in dark mode.
    #[default]
    Primary,
    /// Bordered, transparent background.
    Outline,
}

impl ButtonVariant {
    /// Get CSS classes for this variant.
    #[must_use]
    pub fn classes(self) -> &'static str {
        match self {
            Self::Primary => {
                "bg-slate-900 text-white hover:bg-slate-700 dark:bg-white dark:text-slate-900 \
                 dark:hover:bg-slate-200 shadow-lg"
            }
            Self::Outline => {
                "border border-slate-300 dark:border-slate-700 text-slate-700 dark:text-slate-300 \
                 hover:bg-slate-50 dark:hover:bg-slate-800"
            }
        }
    }
}

const BASE_CLASSES: &str = "inline-flex items-center justify-center gap-2 rounded-lg px-4 py-2.5 \
                            text-sm font-medium transition-all focus-visible:outline-none \
                            focus-visible:ring-2 focus-visible:ring-slate-400 \
                            disabled:pointer-events-none disabled:opacity-50";

/// Form button.
///
/// # Example
///
/// ```rust,ignore
/// view! {
///     <Button variant=ButtonVariant::Primary button_type="submit">
///         "Sign in"
///     </Button>
/// }
/// ```
#[component]
pub fn Button(
    /// Button variant.
    #[prop(default = ButtonVariant::Primary)]
    variant: ButtonVariant,
    /// Button type attribute.
    #[prop(default = "button")]
    button_type: &'static str,
    /// Additional CSS classes.
    #[prop(default = "")]
    class: &'static str,
    /// Button content.
    children: Children,
) -> impl IntoView {
    let classes = format!("{BASE_CLASSES} {} {class}", variant.classes());

    view! {
        <button type=button_type class=classes>
            {children()}
        </button>
    }
}

/// Anchor styled as a button, for navigation actions.
#[component]
pub fn ButtonLink(
    href: &'static str,
    #[prop(default = ButtonVariant::Primary)]
    variant: ButtonVariant,
    children: Children,
) -> impl IntoView {
    let classes = format!("{BASE_CLASSES} {}", variant.classes());

    view! {
        <a href=href class=classes>
            {children()}
        </a>
    }
}

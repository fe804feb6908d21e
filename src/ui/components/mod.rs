//! Reusable SSR building blocks styled with the BuySmart slate palette.
//!
//! - [`Button`] and [`ButtonLink`]: actions with variants
//! - [`Card`], [`CardHeader`], [`CardContent`]: surface containers
//! - [`Field`]: labelled form input
//! - [`Icon`]: inline SVG icons

mod button;
mod card;
mod icons;
mod input;

pub use button::{Button, ButtonLink, ButtonVariant};
pub use card::{Card, CardContent, CardHeader};
pub use icons::{Icon, IconKind};
pub use input::Field;

//! Component variants: the leaves users drop into layout zones.
//!
//! Each variant is a unit struct with a lazily built schema and a generator.
//! Group ids are shared across variants (`content`, `typography`, `style`,
//! `playback`) so similar fields land under the same form section.

pub mod badge;
pub mod button;
pub mod divider;
pub mod heading;
pub mod icon;
pub mod image;
pub mod input;
pub mod link;
pub mod media;
pub mod text;
pub mod textarea;
pub mod toggle;

use crate::block::{GeneratesMarkup, StateView};
use crate::markup::Markup;
use crate::style::{is_yes, ShadowPreset};

pub use badge::Badge;
pub use button::Button;
pub use divider::{Divider, Spacer};
pub use heading::Heading;
pub use icon::Icon;
pub use image::Image;
pub use input::Input;
pub use link::Link;
pub use media::{Audio, Video};
pub use text::Text;
pub use textarea::TextArea;
pub use toggle::{Checkbox, Toggle};

/// Built-in components in palette order.
pub static ALL: &[&dyn GeneratesMarkup] = &[
    &Button,
    &Heading,
    &Text,
    &Link,
    &Image,
    &Icon,
    &Badge,
    &Input,
    &TextArea,
    &Checkbox,
    &Toggle,
    &Video,
    &Audio,
    &Divider,
    &Spacer,
];

pub(crate) const YES_NO: &[&str] = &["No", "Yes"];

/// `target="_blank"` plus the matching `rel` when the "Open In New Tab" field is Yes.
pub(crate) fn apply_link_target(markup: &mut Markup, state: &StateView<'_>) {
    if is_yes(&state.choice("content", "Open In New Tab")) {
        markup.attr("target", "_blank").attr("rel", "noopener noreferrer");
    }
}

pub(crate) fn apply_shadow(markup: &mut Markup, choice: &str) {
    markup.style_opt("box-shadow", ShadowPreset::from_choice(choice).css());
}

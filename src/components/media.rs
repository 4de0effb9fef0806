//! Embedded video and audio players.
//!
//! Both render a fallback sentence inside the element for clients that
//! cannot play the source.

use std::sync::OnceLock;

use super::YES_NO;
use crate::block::{GeneratesMarkup, StateView};
use crate::markup::Markup;
use crate::schema::OptionSchema;
use crate::state::format_number;
use crate::style::{is_yes, px};

const ASPECT_RATIOS: &[&str] = &["16:9", "4:3", "1:1", "21:9"];

/// `controls`, `autoplay`, `loop` and `muted` from the playback group.
fn apply_playback(markup: &mut Markup, state: &StateView<'_>) {
    let autoplay = is_yes(&state.choice("playback", "Autoplay"));
    markup
        .flag("controls", is_yes(&state.choice("playback", "Controls")))
        .flag("autoplay", autoplay)
        .flag("loop", is_yes(&state.choice("playback", "Loop")))
        // browsers refuse unmuted autoplay
        .flag("muted", autoplay || is_yes(&state.choice("playback", "Muted")));
}

pub struct Video;

impl GeneratesMarkup for Video {
    fn type_id(&self) -> &'static str {
        "video"
    }

    fn label(&self) -> &'static str {
        "Video"
    }

    fn schema(&self) -> &'static OptionSchema {
        static SCHEMA: OnceLock<OptionSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            OptionSchema::new()
                .group("content", "Content", |g| {
                    g.text("Video URL", "https://www.w3schools.com/html/mov_bbb.mp4")
                        .text("Poster URL", "")
                })
                .group("playback", "Playback", |g| {
                    g.select("Controls", "Yes", YES_NO)
                        .select("Autoplay", "No", YES_NO)
                        .select("Loop", "No", YES_NO)
                        .select("Muted", "No", YES_NO)
                })
                .group("style", "Styling", |g| {
                    g.number("Width", 100.0, 10.0, 100.0)
                        .select("Aspect Ratio", "16:9", ASPECT_RATIOS)
                        .number("Border Radius", 8.0, 0.0, 50.0)
                        .color("Background Color", "#000000")
                })
        })
    }

    fn generate(&self, state: &StateView<'_>) -> Markup {
        let mut m = Markup::new("video").with_text("Your browser does not support the video tag.");
        m.attr("src", state.text("content", "Video URL"));
        let poster = state.text("content", "Poster URL");
        if !poster.is_empty() {
            m.attr("poster", poster);
        }
        m.attr("playsinline", "");
        apply_playback(&mut m, state);
        m.add_class("pb-video");

        let ratio = state.choice("style", "Aspect Ratio");
        let ratio = if ASPECT_RATIOS.contains(&ratio.as_str()) {
            ratio.replace(':', " / ")
        } else {
            "16 / 9".to_string()
        };
        m.style("display", "block")
            .style("width", format!("{}%", format_number(state.number("style", "Width"))))
            .style("aspect-ratio", ratio)
            .style("object-fit", "cover")
            .style("background-color", state.text("style", "Background Color"))
            .style("border-radius", px(state.number("style", "Border Radius")));
        m
    }
}

pub struct Audio;

impl GeneratesMarkup for Audio {
    fn type_id(&self) -> &'static str {
        "audio"
    }

    fn label(&self) -> &'static str {
        "Audio"
    }

    fn schema(&self) -> &'static OptionSchema {
        static SCHEMA: OnceLock<OptionSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            OptionSchema::new()
                .group("content", "Content", |g| {
                    g.text("Audio URL", "https://www.w3schools.com/html/horse.mp3")
                })
                .group("playback", "Playback", |g| {
                    g.select("Controls", "Yes", YES_NO)
                        .select("Autoplay", "No", YES_NO)
                        .select("Loop", "No", YES_NO)
                        .select("Muted", "No", YES_NO)
                })
                .group("style", "Styling", |g| g.number("Width", 100.0, 10.0, 100.0))
        })
    }

    fn generate(&self, state: &StateView<'_>) -> Markup {
        let mut m = Markup::new("audio").with_text("Your browser does not support the audio element.");
        m.attr("src", state.text("content", "Audio URL"));
        apply_playback(&mut m, state);
        m.add_class("pb-audio");
        m.style("display", "block")
            .style("width", format!("{}%", format_number(state.number("style", "Width"))));
        m
    }
}

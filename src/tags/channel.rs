use chrono::{DateTime, Utc};
use tracing::trace;

use crate::models::Podcast;
use crate::parser_state::{NodeKind, ParserState};
use crate::tags::{FieldRule, Target};
use crate::utils;

#[derive(Clone, Copy, Debug)]
pub enum ChannelField {
    Title,
    Link,
    Author,
    ShortDescription,
    LongDescription,
    Kind,
}

#[derive(Debug)]
pub enum ChannelPatch {
    Language(String),
    Ttl(Option<u32>),
    Updated(Option<DateTime<Utc>>),
    Explicit(bool),
}

impl Target for Podcast {
    type Field = ChannelField;
    type Patch = ChannelPatch;

    fn slot(&mut self, field: ChannelField) -> &mut Option<String> {
        match field {
            ChannelField::Title => &mut self.title,
            ChannelField::Link => &mut self.link,
            ChannelField::Author => &mut self.author,
            ChannelField::ShortDescription => &mut self.description.short,
            ChannelField::LongDescription => &mut self.description.long,
            ChannelField::Kind => &mut self.kind,
        }
    }

    fn merge(&mut self, patch: ChannelPatch) {
        match patch {
            ChannelPatch::Language(language) => self.language = Some(language),
            ChannelPatch::Ttl(ttl) => self.ttl = ttl,
            ChannelPatch::Updated(updated) => self.updated = updated,
            ChannelPatch::Explicit(explicit) => self.explicit = explicit,
        }
    }
}

fn language(text: &str) -> ChannelPatch {
    ChannelPatch::Language(utils::normalize_language(text))
}

fn ttl(text: &str) -> ChannelPatch {
    ChannelPatch::Ttl(utils::parse_leading_int(text).and_then(|n| u32::try_from(n).ok()))
}

fn pub_date(text: &str) -> ChannelPatch {
    ChannelPatch::Updated(utils::parse_pub_date(text))
}

fn explicit(text: &str) -> ChannelPatch {
    ChannelPatch::Explicit(utils::is_explicit(text))
}

/// Dispatch table for the children of `channel`.
pub fn rule(tag: &str) -> Option<FieldRule<Podcast>> {
    let rule: FieldRule<Podcast> = match tag {
        "title" => FieldRule::Text(ChannelField::Title),
        "link" => FieldRule::Text(ChannelField::Link),
        "language" => FieldRule::Transform(language),
        "itunes:author" => FieldRule::Text(ChannelField::Author),
        "itunes:subtitle" => FieldRule::Text(ChannelField::ShortDescription),
        "description" => FieldRule::Text(ChannelField::LongDescription),
        "ttl" => FieldRule::Transform(ttl),
        "pubdate" => FieldRule::Transform(pub_date),
        "itunes:explicit" => FieldRule::Transform(explicit),
        "itunes:type" => FieldRule::Text(ChannelField::Kind),
        _ => return None,
    };
    Some(rule)
}

pub fn on_start(state: &mut ParserState) -> NodeKind {
    trace!(depth = state.stack.len(), "channel opened");
    NodeKind::Channel
}

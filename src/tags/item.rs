use chrono::{DateTime, Utc};
use tracing::trace;

use crate::models::Episode;
use crate::parser_state::{NodeKind, ParserState};
use crate::tags::{FieldRule, Target};
use crate::utils;

/// An episode while its `item` is still open.
///
/// The two description sources are kept apart until the item closes.
#[derive(Debug, Default)]
pub struct EpisodeDraft {
    pub episode: Episode,
    /// `itunes:summary`
    pub summary: Option<String>,
    /// Plain `description`
    pub description: Option<String>,
}

impl EpisodeDraft {
    pub fn push_category(&mut self, category: &str) {
        self.episode
            .categories
            .get_or_insert_with(Vec::new)
            .push(category.to_string());
    }

    /// `itunes:summary` wins over `description`; neither gives an empty string.
    pub fn finish(self) -> Episode {
        let mut episode = self.episode;
        let description = self.summary.or(self.description).unwrap_or_default();
        episode.raw_description = utils::strip_html(&description);
        episode.description = description;
        episode
    }
}

#[derive(Clone, Copy, Debug)]
pub enum ItemField {
    Title,
    Guid,
    Summary,
    Subtitle,
    Description,
    Season,
    Episode,
    EpisodeType,
}

#[derive(Debug)]
pub enum ItemPatch {
    Published(Option<DateTime<Utc>>),
    Duration(Option<u64>),
    Explicit(bool),
}

impl Target for EpisodeDraft {
    type Field = ItemField;
    type Patch = ItemPatch;

    fn slot(&mut self, field: ItemField) -> &mut Option<String> {
        match field {
            ItemField::Title => &mut self.episode.title,
            ItemField::Guid => &mut self.episode.guid,
            ItemField::Summary => &mut self.summary,
            ItemField::Subtitle => &mut self.episode.subtitle,
            ItemField::Description => &mut self.description,
            ItemField::Season => &mut self.episode.season,
            ItemField::Episode => &mut self.episode.episode,
            ItemField::EpisodeType => &mut self.episode.episode_type,
        }
    }

    fn merge(&mut self, patch: ItemPatch) {
        match patch {
            ItemPatch::Published(published) => self.episode.published = published,
            ItemPatch::Duration(duration) => self.episode.duration = duration,
            ItemPatch::Explicit(explicit) => self.episode.explicit = Some(explicit),
        }
    }
}

fn pub_date(text: &str) -> ItemPatch {
    ItemPatch::Published(utils::parse_pub_date(text))
}

fn duration(text: &str) -> ItemPatch {
    ItemPatch::Duration(utils::parse_itunes_duration(text))
}

fn explicit(text: &str) -> ItemPatch {
    ItemPatch::Explicit(utils::is_explicit(text))
}

/// Dispatch table for the children of `item`.
pub fn rule(tag: &str) -> Option<FieldRule<EpisodeDraft>> {
    let rule: FieldRule<EpisodeDraft> = match tag {
        "title" => FieldRule::Text(ItemField::Title),
        "guid" => FieldRule::Text(ItemField::Guid),
        "itunes:summary" => FieldRule::Text(ItemField::Summary),
        "itunes:subtitle" => FieldRule::Text(ItemField::Subtitle),
        "description" => FieldRule::Text(ItemField::Description),
        "pubdate" => FieldRule::Transform(pub_date),
        "itunes:duration" => FieldRule::Transform(duration),
        "itunes:season" => FieldRule::Text(ItemField::Season),
        "itunes:episode" => FieldRule::Text(ItemField::Episode),
        "itunes:episodetype" => FieldRule::Text(ItemField::EpisodeType),
        "itunes:explicit" => FieldRule::Transform(explicit),
        _ => return None,
    };
    Some(rule)
}

pub fn on_start() -> NodeKind {
    trace!("item opened");
    NodeKind::Item(Box::default())
}

pub fn on_end(draft: EpisodeDraft, state: &mut ParserState) {
    let episode = draft.finish();
    trace!(guid = episode.guid.as_deref().unwrap_or(""), "episode finished");
    state.podcast.episodes.push(episode);
}

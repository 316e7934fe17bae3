use crate::parser_state::{Attributes, ParserState};

/// Podcast artwork comes from the `href` attribute, never from text.
pub fn on_channel_start(attributes: &Attributes, state: &mut ParserState) {
    state.podcast.image = attributes.get("href").cloned();
}

pub fn on_item_start(attributes: &Attributes, state: &mut ParserState) {
    if let Some(draft) = state.current_episode_mut() {
        draft.episode.image = attributes.get("href").cloned();
    }
}

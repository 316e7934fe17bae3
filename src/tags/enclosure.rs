use crate::models::Enclosure;
use crate::parser_state::{Attributes, ParserState};
use crate::utils;

pub fn on_start(attributes: &Attributes, state: &mut ParserState) {
    let Some(draft) = state.current_episode_mut() else {
        return;
    };

    draft.episode.enclosure = Some(Enclosure {
        filesize: attributes
            .get("length")
            .and_then(|length| utils::parse_leading_int(length)),
        mime_type: attributes.get("type").cloned(),
        url: attributes.get("url").cloned(),
    });
}

use crate::parser_state::{Attributes, ParserState};

pub const PATH_DELIMITER: &str = ">";

/// `itunes:category`: rebuild the full path from enclosing categories.
///
/// A path whose root equals the last recorded entry replaces that entry,
/// since it is the same category spelled out in more detail. An element
/// without `text` is not recorded itself; below it, it stands for an empty
/// segment, so `<itunes:category><itunes:category text="A1"/>` gives `>A1`.
pub fn on_start(attributes: &Attributes, state: &mut ParserState) {
    let Some(own) = attributes.get("text") else {
        return;
    };

    let mut path: Vec<&str> = state
        .ancestors()
        .take_while(|node| node.name == "itunes:category")
        .map(|node| node.attr("text").unwrap_or_default())
        .collect();
    path.reverse();
    path.push(own);

    let label = path.join(PATH_DELIMITER);
    let root = path[0].to_string();

    let categories = &mut state.podcast.categories;
    match categories.last_mut() {
        Some(last) if *last == root => *last = label,
        _ => categories.push(label),
    }
}

/// Plain `category` text anywhere inside an item goes to the episode as-is.
pub fn on_text(data: &str, state: &mut ParserState) {
    if let Some(draft) = state.current_episode_mut() {
        draft.push_category(data);
    }
}

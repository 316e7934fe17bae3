use tracing::trace;

use crate::parser_state::{Attributes, NodeContext, NodeKind, ParserState};

pub mod category;
pub mod channel;
pub mod enclosure;
pub mod item;
pub mod itunes_image;
pub mod itunes_owner;

/// Something a container element writes its children's text into.
pub trait Target {
    /// Plain text slots, filled verbatim.
    type Field: Copy;
    /// Converted values produced by transform rules.
    type Patch;

    fn slot(&mut self, field: Self::Field) -> &mut Option<String>;
    fn merge(&mut self, patch: Self::Patch);
}

/// One entry of a container's dispatch table.
pub enum FieldRule<T: Target> {
    /// Copy the text into a slot. A second fragment is appended after a space.
    Text(T::Field),
    /// Convert the text and merge the result, replacing any earlier value.
    Transform(fn(&str) -> T::Patch),
}

pub fn apply_rule<T: Target>(rule: Option<FieldRule<T>>, target: &mut T, data: &str) {
    match rule {
        Some(FieldRule::Text(field)) => {
            let slot = target.slot(field);
            *slot = match slot.take() {
                Some(prev) => Some(format!("{prev} {data}")),
                None => Some(data.to_string()),
            };
        }
        Some(FieldRule::Transform(convert)) => target.merge(convert(data)),
        None => {}
    }
}

pub fn dispatch_start(name: String, attributes: Attributes, state: &mut ParserState) {
    // The document root never acts as a container.
    let Some(parent) = state.current() else {
        state.push(NodeContext {
            name,
            attributes,
            kind: NodeKind::Passthrough,
        });
        return;
    };
    let parent_is_channel = parent.name == "channel";

    let kind = match name.as_str() {
        "channel" => channel::on_start(state),
        "itunes:image" if parent_is_channel => {
            itunes_image::on_channel_start(&attributes, state);
            NodeKind::Passthrough
        }
        "itunes:owner" if parent_is_channel => itunes_owner::on_start(state),
        "itunes:category" => {
            category::on_start(&attributes, state);
            NodeKind::Passthrough
        }
        "item" if parent_is_channel => item::on_start(),
        "itunes:image" => {
            itunes_image::on_item_start(&attributes, state);
            NodeKind::Passthrough
        }
        "enclosure" => {
            enclosure::on_start(&attributes, state);
            NodeKind::Passthrough
        }
        _ => NodeKind::Passthrough,
    };

    state.push(NodeContext {
        name,
        attributes,
        kind,
    });
}

pub fn dispatch_text(data: &str, state: &mut ParserState) {
    let depth = state.stack.len();
    if depth < 2 {
        // Text directly in the root element, or outside it.
        return;
    }

    let (ancestors, current) = state.stack.split_at_mut(depth - 1);
    let name = current[0].name.as_str();
    match &mut ancestors[depth - 2].kind {
        NodeKind::Channel => apply_rule(channel::rule(name), &mut state.podcast, data),
        NodeKind::Owner => apply_rule(itunes_owner::rule(name), &mut state.podcast.owner, data),
        NodeKind::Item(draft) => apply_rule(item::rule(name), draft.as_mut(), data),
        NodeKind::Passthrough => {}
    }

    if name == "category" {
        category::on_text(data, state);
    }
}

pub fn dispatch_end(name: &str, state: &mut ParserState) {
    let Some(node) = state.pop() else {
        return;
    };
    trace!(element = name, "close");

    if let NodeKind::Item(draft) = node.kind {
        item::on_end(*draft, state);
    }
}

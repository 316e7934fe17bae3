use std::collections::{HashMap, HashSet};

use serde::Deserialize;
use tracing::debug;

use crate::models::Podcast;
use crate::tags::{self, item::EpisodeDraft};

/// Attribute name → value for one element, names already normalized.
pub type Attributes = HashMap<String, String>;

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ParseOptions {
    /// Trim whitespace around every text and CDATA fragment.
    pub trim: bool,
    /// Lowercase element and attribute names before dispatch.
    pub lowercase: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            trim: true,
            lowercase: true,
        }
    }
}

/// What an open element writes into.
pub enum NodeKind {
    /// `channel`: children write into the podcast itself.
    Channel,
    /// `itunes:owner` directly under `channel`.
    Owner,
    /// `item` directly under `channel`; owns the episode until it closes.
    Item(Box<EpisodeDraft>),
    Passthrough,
}

pub struct NodeContext {
    pub name: String,
    pub attributes: Attributes,
    pub kind: NodeKind,
}

impl NodeContext {
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

/// State of one parse: the open-element stack plus the podcast being built.
///
/// The stack's order is the parent chain: `stack[i - 1]` is the parent of
/// `stack[i]`.
pub struct ParserState {
    pub options: ParseOptions,
    pub podcast: Podcast,
    pub stack: Vec<NodeContext>,
}

impl Default for ParserState {
    fn default() -> Self {
        Self::new(ParseOptions::default())
    }
}

impl ParserState {
    pub fn new(options: ParseOptions) -> Self {
        Self {
            options,
            podcast: Podcast::default(),
            stack: Vec::new(),
        }
    }

    pub fn current(&self) -> Option<&NodeContext> {
        self.stack.last()
    }

    /// Open elements from the innermost outwards.
    pub fn ancestors(&self) -> impl Iterator<Item = &NodeContext> {
        self.stack.iter().rev()
    }

    pub fn push(&mut self, node: NodeContext) {
        self.stack.push(node);
    }

    pub fn pop(&mut self) -> Option<NodeContext> {
        self.stack.pop()
    }

    /// The episode of the innermost open `item`, at any depth below it.
    pub fn current_episode_mut(&mut self) -> Option<&mut EpisodeDraft> {
        self.stack.iter_mut().rev().find_map(|node| match &mut node.kind {
            NodeKind::Item(draft) => Some(draft.as_mut()),
            _ => None,
        })
    }

    fn normalize_name(&self, name: &str) -> String {
        if self.options.lowercase {
            name.to_lowercase()
        } else {
            name.to_string()
        }
    }

    pub fn open(&mut self, name: &str, attributes: Attributes) {
        let name = self.normalize_name(name);
        let attributes = if self.options.lowercase {
            attributes
                .into_iter()
                .map(|(k, v)| (k.to_lowercase(), v))
                .collect()
        } else {
            attributes
        };
        tags::dispatch_start(name, attributes, self);
    }

    /// One text or CDATA fragment of the innermost open element. A logical
    /// text node may arrive as several fragments.
    pub fn text(&mut self, fragment: &str) {
        if fragment.trim().is_empty() {
            return;
        }
        let data = if self.options.trim {
            fragment.trim()
        } else {
            fragment
        };
        tags::dispatch_text(data, self);
    }

    pub fn close(&mut self, name: &str) {
        let name = self.normalize_name(name);
        tags::dispatch_end(&name, self);
    }

    /// End of document: newest episode first, `updated` defaulted from the
    /// newest episode, categories deduplicated in first-seen order.
    pub fn finish(mut self) -> Podcast {
        let podcast = &mut self.podcast;

        // Stable, so equal timestamps keep document order. Undated episodes sink.
        podcast
            .episodes
            .sort_by(|a, b| b.published.cmp(&a.published));

        if podcast.updated.is_none() {
            podcast.updated = podcast.episodes.first().and_then(|e| e.published);
        }

        let mut seen = HashSet::new();
        podcast.categories.retain(|c| seen.insert(c.clone()));

        debug!(
            episodes = podcast.episodes.len(),
            categories = podcast.categories.len(),
            "feed finalized"
        );
        self.podcast
    }
}

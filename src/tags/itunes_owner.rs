use std::convert::Infallible;

use tracing::trace;

use crate::models::Owner;
use crate::parser_state::{NodeKind, ParserState};
use crate::tags::{FieldRule, Target};

#[derive(Clone, Copy, Debug)]
pub enum OwnerField {
    Name,
    Email,
}

impl Target for Owner {
    type Field = OwnerField;
    type Patch = Infallible;

    fn slot(&mut self, field: OwnerField) -> &mut Option<String> {
        match field {
            OwnerField::Name => &mut self.name,
            OwnerField::Email => &mut self.email,
        }
    }

    fn merge(&mut self, patch: Infallible) {
        match patch {}
    }
}

pub fn rule(tag: &str) -> Option<FieldRule<Owner>> {
    match tag {
        "itunes:name" => Some(FieldRule::Text(OwnerField::Name)),
        "itunes:email" => Some(FieldRule::Text(OwnerField::Email)),
        _ => None,
    }
}

/// A fresh owner replaces whatever an earlier `itunes:owner` left behind.
pub fn on_start(state: &mut ParserState) -> NodeKind {
    trace!("itunes:owner opened");
    state.podcast.owner = Owner::default();
    NodeKind::Owner
}

//! Turns a podcast RSS feed (with iTunes extensions) into a normalized
//! [`Podcast`]: metadata, categories, and episodes sorted newest first.

use std::io::Read;

use xml::name::OwnedName;
use xml::reader::{ParserConfig, XmlEvent};

pub mod error;
pub mod models;
pub mod outputs;
pub mod parser_state;
pub mod tags;
pub mod utils;


pub use error::{ParseError, Result};
pub use models::{Enclosure, Episode, Owner, Podcast, PodcastDescription};
pub use parser_state::{Attributes, ParseOptions, ParserState};

/// `prefix:local`, the form the dispatch tables are keyed on.
fn qualified_name(name: &OwnedName) -> String {
    match name.prefix.as_deref() {
        Some(prefix) => format!("{}:{}", prefix, name.local_name),
        None => name.local_name.clone(),
    }
}

pub fn parse(xml: &str) -> Result<Podcast> {
    parse_with_options(xml, &ParseOptions::default())
}

pub fn parse_with_options(xml: &str, options: &ParseOptions) -> Result<Podcast> {
    parse_reader(xml.as_bytes(), options)
}

/// Runs the whole document through a [`ParserState`]. Any tokenizer fault
/// aborts the pass; nothing partial is returned.
pub fn parse_reader<R: Read>(reader: R, options: &ParseOptions) -> Result<Podcast> {
    let mut events = ParserConfig::new()
        .trim_whitespace(options.trim)
        .cdata_to_characters(false)
        .ignore_comments(true)
        .create_reader(reader);
    let mut state = ParserState::new(options.clone());

    loop {
        match events.next()? {
            XmlEvent::StartElement {
                name, attributes, ..
            } => {
                let attributes = attributes
                    .into_iter()
                    .map(|a| (qualified_name(&a.name), a.value))
                    .collect();
                state.open(&qualified_name(&name), attributes);
            }
            XmlEvent::Characters(data) | XmlEvent::CData(data) => state.text(&data),
            XmlEvent::EndElement { name } => state.close(&qualified_name(&name)),
            XmlEvent::EndDocument => break,
            _ => {}
        }
    }

    Ok(state.finish())
}

/// Parses on a blocking worker thread and resolves once the pass is done.
pub async fn parse_async(xml: String, options: ParseOptions) -> Result<Podcast> {
    tokio::task::spawn_blocking(move || parse_with_options(&xml, &options)).await?
}

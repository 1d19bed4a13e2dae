//! Dynamic request layer.
//!
//! Takes JSON requests built from user input and answers them against the
//! channel and emoji caches. Arguments arrive as raw JSON values; a value
//! of the wrong shape is "no match", never an error.
//!
//! ## Request format
//!
//! ```json
//! {"op": "search_by", "target": "emojis", "query": ["<:blob:1>", {"name": {"pattern": "^wave"}}]}
//! {"op": "filter_by_author_id", "target": "emojis", "id": "42"}
//! {"op": "get_by_types", "target": "channels", "types": ["GuildText", 2]}
//! ```

pub mod classify;

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error};

use crate::cache::Collection;
use crate::error::Result;
use crate::query::{ChannelManager, EmojiManager, SearchOutcome};

/// Which cache a request reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    Channels,
    Emojis,
}

/// A query request, tagged by `op`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    GetById {
        target: Target,
        #[serde(default)]
        id: Value,
    },
    GetByName {
        target: Target,
        #[serde(default)]
        query: Value,
    },
    GetByTopic {
        target: Target,
        #[serde(default)]
        query: Value,
    },
    GetByTypes {
        target: Target,
        #[serde(default)]
        types: Value,
    },
    GetByUrl {
        target: Target,
        #[serde(default)]
        url: Value,
    },
    FilterByAuthorId {
        target: Target,
        #[serde(default)]
        id: Value,
    },
    FilterByGuildId {
        target: Target,
        #[serde(default)]
        id: Value,
    },
    FilterByParentId {
        target: Target,
        #[serde(default)]
        id: Value,
    },
    FilterAnimateds { target: Target },
    FilterStatics { target: Target },
    FilterAvailables { target: Target },
    FilterUnavailables { target: Target },
    FilterDeletables { target: Target },
    FilterUndeletables { target: Target },
    SearchBy {
        target: Target,
        #[serde(default)]
        query: Value,
    },
}

/// Answer to a [`Request`]: one optional entity, or a list of entities.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    One { entity: Option<Value> },
    Many { entities: Vec<Value> },
}

impl Response {
    fn none() -> Self {
        Self::One { entity: None }
    }

    fn empty() -> Self {
        Self::Many {
            entities: Vec::new(),
        }
    }

    fn one<E: Serialize>(found: Option<Arc<E>>) -> Result<Self> {
        let entity = found.map(|e| serde_json::to_value(&*e)).transpose()?;
        Ok(Self::One { entity })
    }

    fn many<E: crate::models::Entity + Serialize>(found: Collection<E>) -> Result<Self> {
        let entities = found
            .iter()
            .map(|e| serde_json::to_value(&**e))
            .collect::<serde_json::Result<Vec<_>>>()?;
        Ok(Self::Many { entities })
    }

    /// Whether the response carries no entities.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::One { entity } => entity.is_none(),
            Self::Many { entities } => entities.is_empty(),
        }
    }
}

/// Answers requests against a channel cache and an emoji cache.
#[derive(Clone)]
pub struct RequestHandler {
    channels: ChannelManager,
    emojis: EmojiManager,
}

/// Dispatch a search on either manager and wrap its outcome.
macro_rules! search {
    ($manager:expr, $query:expr) => {
        match classify::query($query) {
            Some(query) => match $manager.search(query) {
                SearchOutcome::One(found) => Response::one(found),
                SearchOutcome::Many(found) => Response::many(found),
            },
            None => Ok(Response::none()),
        }
    };
}

impl RequestHandler {
    pub fn new(channels: ChannelManager, emojis: EmojiManager) -> Self {
        Self { channels, emojis }
    }

    /// Parse one JSON request and answer it.
    ///
    /// # Errors
    /// Returns an error only if the line is not a well-formed request.
    pub fn handle_line(&self, line: &str) -> Result<Response> {
        let request: Request = serde_json::from_str(line)?;
        self.handle(&request)
    }

    /// Answer newline-delimited requests from `input`, one JSON line each
    /// on `output`, until `input` is exhausted.
    ///
    /// A line that is not UTF-8 or not a well-formed request is logged and
    /// answered with `null`; blank lines are skipped.
    ///
    /// # Errors
    /// Returns an error only if reading `input` or writing `output` fails.
    pub fn serve<R: BufRead, W: Write>(&self, mut input: R, mut output: W) -> io::Result<()> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                return Ok(());
            }

            let line = match std::str::from_utf8(&buf) {
                Ok(line) => line.trim(),
                Err(e) => {
                    error!("Bad request: not UTF-8: {}", e);
                    output.write_all(b"null\n")?;
                    output.flush()?;
                    continue;
                }
            };
            if line.is_empty() {
                continue;
            }

            match self.handle_line(line) {
                Ok(response) => serde_json::to_writer(&mut output, &response).map_err(io::Error::other)?,
                Err(e) => {
                    error!("Bad request: {}", e);
                    output.write_all(b"null")?;
                }
            }
            output.write_all(b"\n")?;
            output.flush()?;
        }
    }

    /// Answer a request.
    ///
    /// # Errors
    /// Only fails if a found entity cannot be serialized.
    pub fn handle(&self, request: &Request) -> Result<Response> {
        use Target::{Channels, Emojis};

        debug!("Handling request: {:?}", request);

        match request {
            Request::GetById { target, id } => {
                let Some(id) = classify::key(id) else {
                    return Ok(Response::none());
                };
                match target {
                    Channels => Response::one(self.channels.get_by_id(id)),
                    Emojis => Response::one(self.emojis.get_by_id(id)),
                }
            }
            Request::GetByName { target, query } => {
                let Some(query) = classify::text_match(query) else {
                    return Ok(Response::none());
                };
                match target {
                    Channels => Response::one(self.channels.get_by_name(query)),
                    Emojis => Response::one(self.emojis.get_by_name(query)),
                }
            }
            Request::GetByTopic { target, query } => match (target, classify::text_match(query)) {
                (Channels, Some(query)) => Response::one(self.channels.get_by_topic(query)),
                _ => Ok(Response::none()),
            },
            Request::GetByTypes { target, types } => match target {
                Channels => Response::many(self.channels.get_by_types(classify::type_selector(types))),
                Emojis => Ok(Response::empty()),
            },
            Request::GetByUrl { target, url } => match (target, classify::key(url)) {
                (Channels, Some(url)) => Response::one(self.channels.get_by_url(url)),
                _ => Ok(Response::none()),
            },
            Request::FilterByAuthorId { target, id } => match (target, classify::key(id)) {
                (Emojis, Some(id)) => Response::many(self.emojis.filter_by_author_id(id)),
                _ => Ok(Response::empty()),
            },
            Request::FilterByGuildId { target, id } => match (target, classify::key(id)) {
                (Channels, Some(id)) => Response::many(self.channels.filter_by_guild_id(id)),
                (Emojis, Some(id)) => Response::many(self.emojis.filter_by_guild_id(id)),
                _ => Ok(Response::empty()),
            },
            Request::FilterByParentId { target, id } => match (target, classify::key(id)) {
                (Channels, Some(id)) => Response::many(self.channels.filter_by_parent_id(id)),
                _ => Ok(Response::empty()),
            },
            Request::FilterAnimateds { target } => self.emoji_filter(*target, EmojiManager::filter_animateds),
            Request::FilterStatics { target } => self.emoji_filter(*target, EmojiManager::filter_statics),
            Request::FilterAvailables { target } => {
                self.emoji_filter(*target, EmojiManager::filter_availables)
            }
            Request::FilterUnavailables { target } => {
                self.emoji_filter(*target, EmojiManager::filter_unavailables)
            }
            Request::FilterDeletables { target } => {
                self.emoji_filter(*target, EmojiManager::filter_deletables)
            }
            Request::FilterUndeletables { target } => {
                self.emoji_filter(*target, EmojiManager::filter_undeletables)
            }
            Request::SearchBy { target, query } => match target {
                Channels => search!(self.channels, query),
                Emojis => search!(self.emojis, query),
            },
        }
    }

    fn emoji_filter<F>(&self, target: Target, filter: F) -> Result<Response>
    where
        F: FnOnce(&EmojiManager) -> Collection<crate::models::Emoji>,
    {
        match target {
            Target::Emojis => Response::many(filter(&self.emojis)),
            Target::Channels => Ok(Response::empty()),
        }
    }
}

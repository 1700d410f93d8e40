use super::*;

#[derive(Debug, Deserialize)]
pub(crate) struct Listing {
  data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
  #[serde(default)]
  children: Vec<Thing>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MoreChildrenResponse {
  json: MoreChildrenPayload,
}

#[derive(Debug, Deserialize)]
struct MoreChildrenPayload {
  data: Option<MoreChildrenData>,
  #[serde(default)]
  errors: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct MoreChildrenData {
  #[serde(default)]
  things: Vec<Thing>,
}

/// Comment payload as served, before normalization into a `Comment`.
#[derive(Debug, Deserialize)]
struct RawComment {
  author: Option<String>,
  author_flair_text: Option<String>,
  body: Option<String>,
  #[serde(default, deserialize_with = "deserialize_optional_integer")]
  created_utc: Option<i64>,
  #[serde(default, deserialize_with = "deserialize_optional_integer")]
  downs: Option<i64>,
  #[serde(default, deserialize_with = "deserialize_optional_integer")]
  gilded: Option<i64>,
  id: String,
  link_id: Option<String>,
  parent_id: Option<String>,
  #[serde(default, deserialize_with = "deserialize_replies")]
  replies: Option<Listing>,
  #[serde(default, deserialize_with = "deserialize_optional_integer")]
  score: Option<i64>,
  subreddit: Option<String>,
  subreddit_id: Option<String>,
  #[serde(default, deserialize_with = "deserialize_optional_integer")]
  ups: Option<i64>,
}

/// A `{"kind": ..., "data": ...}` envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct Thing {
  data: Value,
  kind: String,
}

impl Listing {
  pub(crate) fn into_nodes(self) -> Result<Vec<Node>> {
    Thing::into_nodes(self.data.children)
  }

  pub(crate) fn into_things(self) -> Vec<Thing> {
    self.data.children
  }
}

impl MoreChildrenResponse {
  pub(crate) fn into_nodes(self) -> Result<Vec<Node>> {
    let MoreChildrenPayload { data, errors } = self.json;

    if !errors.is_empty() {
      bail!(
        "reddit rejected the request: {}",
        serde_json::to_string(&errors)?
      );
    }

    Thing::into_nodes(data.map(|data| data.things).unwrap_or_default())
  }
}

impl RawComment {
  fn into_node(self) -> Result<Node> {
    let replies = match self.replies {
      Some(listing) => listing.into_nodes()?,
      None => Vec::new(),
    };

    let comment = Comment {
      author: self.author,
      author_flair_text: self.author_flair_text.as_deref().map(decode_entities),
      body: self.body.as_deref().map(decode_entities),
      created_utc: self.created_utc,
      downs: self.downs,
      gilded: self.gilded,
      id: self.id,
      link_id: self.link_id,
      parent_id: self.parent_id,
      score: self.score,
      subreddit: self.subreddit,
      subreddit_id: self.subreddit_id,
      ups: self.ups,
    };

    Ok(Node::Comment { comment, replies })
  }
}

impl Thing {
  pub(crate) fn fullname(&self) -> Option<&str> {
    self.data.get("name")?.as_str()
  }

  /// Converts comments and placeholders; other kinds yield `None`.
  pub(crate) fn into_node(self) -> Result<Option<Node>> {
    match self.kind.as_str() {
      "t1" => Ok(Some(
        serde_json::from_value::<RawComment>(self.data)
          .context("malformed comment")?
          .into_node()?,
      )),
      "more" => Ok(Some(Node::More(
        serde_json::from_value::<MoreComments>(self.data)
          .context("malformed placeholder")?,
      ))),
      kind => {
        debug!(kind, "ignoring thing");
        Ok(None)
      }
    }
  }

  fn into_nodes(things: Vec<Thing>) -> Result<Vec<Node>> {
    let mut nodes = Vec::with_capacity(things.len());

    for thing in things {
      if let Some(node) = thing.into_node()? {
        nodes.push(node);
      }
    }

    Ok(nodes)
  }

  pub(crate) fn kind(&self) -> &str {
    &self.kind
  }
}

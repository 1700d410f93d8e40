use super::*;

/// Reddit escapes `&`, `<` and `>` in text fields.
pub(crate) fn decode_entities(text: &str) -> String {
  html_escape::decode_html_entities(text).into_owned()
}

/// Accepts integers and floats (`created_utc` arrives as `1420070400.0`),
/// truncating the latter.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn deserialize_optional_integer<'de, D>(
  deserializer: D,
) -> Result<Option<i64>, D::Error>
where
  D: Deserializer<'de>,
{
  let value = Option::<Value>::deserialize(deserializer)?;

  match value {
    None | Some(Value::Null) => Ok(None),
    Some(Value::Number(n)) => {
      if let Some(integer) = n.as_i64() {
        Ok(Some(integer))
      } else if let Some(float) = n.as_f64() {
        Ok(Some(float.trunc() as i64))
      } else {
        Err(de::Error::invalid_value(
          Unexpected::Other("out of range number"),
          &"an integer",
        ))
      }
    }
    Some(Value::Bool(b)) => {
      Err(de::Error::invalid_type(Unexpected::Bool(b), &"a number"))
    }
    Some(Value::String(s)) => {
      Err(de::Error::invalid_type(Unexpected::Str(&s), &"a number"))
    }
    Some(Value::Array(_)) => {
      Err(de::Error::invalid_type(Unexpected::Seq, &"a number"))
    }
    Some(Value::Object(_)) => {
      Err(de::Error::invalid_type(Unexpected::Map, &"a number"))
    }
  }
}

/// Comments without replies carry `"replies": ""` instead of a listing.
pub(crate) fn deserialize_replies<'de, D>(
  deserializer: D,
) -> Result<Option<Listing>, D::Error>
where
  D: Deserializer<'de>,
{
  let value = Option::<Value>::deserialize(deserializer)?;

  match value {
    None | Some(Value::Null) => Ok(None),
    Some(Value::String(s)) if s.is_empty() => Ok(None),
    Some(value @ Value::Object(_)) => serde_json::from_value(value)
      .map(Some)
      .map_err(de::Error::custom),
    Some(Value::String(s)) => Err(de::Error::invalid_value(
      Unexpected::Str(&s),
      &"an empty string or a listing",
    )),
    Some(Value::Bool(b)) => Err(de::Error::invalid_type(
      Unexpected::Bool(b),
      &"an empty string or a listing",
    )),
    Some(Value::Number(_)) => Err(de::Error::invalid_type(
      Unexpected::Other("number"),
      &"an empty string or a listing",
    )),
    Some(Value::Array(_)) => Err(de::Error::invalid_type(
      Unexpected::Seq,
      &"an empty string or a listing",
    )),
  }
}

use super::*;

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct AppCredentials {
  pub(crate) client_id: String,
  pub(crate) client_secret: String,
}

/// Settings taken from the environment, resolved once at startup.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Config {
  pub(crate) credentials: Option<AppCredentials>,
  pub(crate) user_agent: String,
}

impl Config {
  pub(crate) fn from_env(lookup: impl Fn(&str) -> Option<String>) -> Self {
    let non_empty = |key: &str| lookup(key).filter(|value| !value.is_empty());

    let credentials =
      non_empty("REDDIT_CLIENT_ID").map(|client_id| AppCredentials {
        client_id,
        client_secret: lookup("REDDIT_CLIENT_SECRET").unwrap_or_default(),
      });

    let user_agent = non_empty("REDDIT_USER_AGENT")
      .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

    Self {
      credentials,
      user_agent,
    }
  }
}

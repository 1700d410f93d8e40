use super::*;

#[derive(Debug, Deserialize)]
struct AccessTokenResponse {
  access_token: Option<String>,
  error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LoginPayload {
  #[serde(default)]
  errors: Vec<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
  json: LoginPayload,
}

/// How requests prove who is asking.
#[derive(Debug, Eq, PartialEq)]
pub(crate) enum Session {
  Bearer { token: String },
  Cookie,
}

impl AccessTokenResponse {
  fn into_session(self) -> Result<Session> {
    if let Some(error) = self.error {
      bail!("reddit refused the credentials: {error}");
    }

    let token = self
      .access_token
      .filter(|token| !token.is_empty())
      .context("reddit did not return an access token")?;

    Ok(Session::Bearer { token })
  }
}

impl LoginResponse {
  fn into_session(self) -> Result<Session> {
    let messages = self
      .json
      .errors
      .iter()
      .map(|error| {
        error
          .get(1)
          .or_else(|| error.first())
          .and_then(Value::as_str)
          .unwrap_or("unknown error")
          .to_string()
      })
      .collect::<Vec<_>>();

    if !messages.is_empty() {
      bail!("reddit refused the credentials: {}", messages.join(", "));
    }

    Ok(Session::Cookie)
  }
}

impl Session {
  const ACCESS_TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";

  const LOGIN_URL: &str = "https://www.reddit.com/api/login";

  const OAUTH_BASE_URL: &str = "https://oauth.reddit.com";

  const WEB_BASE_URL: &str = "https://www.reddit.com";

  pub(crate) fn api_base(&self) -> &'static str {
    match self {
      Self::Bearer { .. } => Self::OAUTH_BASE_URL,
      Self::Cookie => Self::WEB_BASE_URL,
    }
  }

  pub(crate) fn authorize(
    &self,
    request: reqwest::RequestBuilder,
  ) -> reqwest::RequestBuilder {
    match self {
      Self::Bearer { token } => request.bearer_auth(token),
      Self::Cookie => request,
    }
  }

  async fn cookie_login(
    client: &reqwest::Client,
    username: &str,
    password: &str,
  ) -> Result<Self> {
    client
      .post(format!("{}/{username}", Self::LOGIN_URL))
      .form(&[
        ("api_type", "json"),
        ("passwd", password),
        ("rem", "false"),
        ("user", username),
      ])
      .send()
      .await?
      .error_for_status()?
      .json::<LoginResponse>()
      .await?
      .into_session()
  }

  /// Logs in with an OAuth password grant when application credentials are
  /// configured, and with the legacy cookie login otherwise.
  pub(crate) async fn establish(
    client: &reqwest::Client,
    config: &Config,
    username: &str,
    password: &str,
  ) -> Result<Self> {
    match &config.credentials {
      Some(credentials) => {
        info!(client_id = %credentials.client_id, "logging in with oauth");
        Self::password_grant(client, credentials, username, password).await
      }
      None => {
        info!("logging in with session cookie");
        Self::cookie_login(client, username, password).await
      }
    }
  }

  async fn password_grant(
    client: &reqwest::Client,
    credentials: &AppCredentials,
    username: &str,
    password: &str,
  ) -> Result<Self> {
    client
      .post(Self::ACCESS_TOKEN_URL)
      .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
      .form(&[
        ("grant_type", "password"),
        ("password", password),
        ("username", username),
      ])
      .send()
      .await?
      .error_for_status()?
      .json::<AccessTokenResponse>()
      .await?
      .into_session()
  }
}

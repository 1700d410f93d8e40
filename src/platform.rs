use super::*;

/// Host family, which decides where the exported file lands.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Platform {
  MacOs,
  Other,
  Windows,
}

impl Platform {
  pub(crate) fn csv_file_path(
    self,
    submission_id: &str,
    lookup: impl Fn(&str) -> Option<String>,
  ) -> Result<PathBuf> {
    Ok(
      self
        .data_directory(lookup)?
        .join(Self::csv_filename(submission_id)),
    )
  }

  fn csv_filename(submission_id: &str) -> String {
    format!("{submission_id}.csv")
  }

  pub(crate) fn current() -> Self {
    if cfg!(windows) {
      Self::Windows
    } else if cfg!(target_os = "macos") {
      Self::MacOs
    } else {
      Self::Other
    }
  }

  fn data_directory(
    self,
    lookup: impl Fn(&str) -> Option<String>,
  ) -> Result<PathBuf> {
    match self {
      Self::MacOs => Ok(Self::home(lookup)?.join("Desktop")),
      Self::Other => Self::home(lookup),
      Self::Windows => {
        dirs::desktop_dir().context("could not locate the desktop folder")
      }
    }
  }

  fn home(lookup: impl Fn(&str) -> Option<String>) -> Result<PathBuf> {
    lookup("HOME")
      .map(PathBuf::from)
      .context("environment variable `HOME` is not set")
  }
}

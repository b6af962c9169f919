//! Theme preference.
//!
//! The light/dark choice is the only thing folio remembers between runs.
//! It is stored as a single word in the platform config directory.
use anyhow::{Context, Result};
use directories::ProjectDirs;
use log::{debug, warn};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Name of the file holding the stored theme.
const THEME_FILE: &str = "theme";

/// Colour theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme
{
    /// Dark text on a light background
    #[default]
    Light,
    /// Light text on a dark background
    Dark,
}

impl Theme
{
    /// The other theme.
    #[must_use]
    pub const fn toggled(self) -> Self
    {
        match self
        {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Stored name of the theme.
    #[must_use]
    pub const fn as_str(self) -> &'static str
    {
        match self
        {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Theme
{
    type Err = anyhow::Error;

    fn from_str(text: &str) -> Result<Self>
    {
        match text.trim().to_lowercase().as_str()
        {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(anyhow::anyhow!("Unknown theme \"{other}\"")),
        }
    }
}

/// Persistent store for the theme preference.
pub struct ThemeStore
{
    /// Directory where the preference file lives
    config_dir: PathBuf,
}

impl ThemeStore
{
    /// Creates a store in the platform config directory.
    ///
    /// The directory is created when the preference is first saved.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined.
    pub fn new() -> Result<Self>
    {
        let project_dirs = ProjectDirs::from("", "folio", "folio")
            .context("Failed to determine project directories")?;

        Ok(Self::in_dir(project_dirs.config_dir()))
    }

    /// Creates a store rooted at `dir`.
    #[must_use]
    pub fn in_dir(dir: &Path) -> Self
    {
        Self {
            config_dir: dir.to_path_buf(),
        }
    }

    /// Reads the stored theme.
    ///
    /// A missing, unreadable or unrecognised preference yields
    /// [`Theme::Light`].
    #[must_use]
    pub fn get(&self) -> Theme
    {
        let Ok(content) = fs::read_to_string(self.theme_path())
        else
        {
            return Theme::default();
        };

        content.parse().unwrap_or_else(|err| {
            warn!("Ignoring stored theme: {err}");
            Theme::default()
        })
    }

    /// Stores `theme`.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory or file cannot be written.
    pub fn set(&self, theme: Theme) -> Result<()>
    {
        fs::create_dir_all(&self.config_dir).context("Failed to create config directory")?;

        fs::write(self.theme_path(), theme.as_str())
            .with_context(|| format!("Failed to store theme {theme}"))?;

        debug!("Stored theme {theme}");
        Ok(())
    }

    /// Flips the stored theme and returns the new one.
    ///
    /// # Errors
    ///
    /// Returns an error if the new theme cannot be stored.
    pub fn toggle(&self) -> Result<Theme>
    {
        let theme = self.get().toggled();
        self.set(theme)?;
        Ok(theme)
    }

    /// Forgets the stored preference.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing preference file cannot be removed.
    pub fn clear(&self) -> Result<()>
    {
        let path = self.theme_path();

        if path.exists()
        {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove {}", path.display()))?;
        }

        Ok(())
    }

    /// Get the config directory.
    #[must_use]
    pub fn config_dir(&self) -> &Path
    {
        &self.config_dir
    }

    /// Path of the preference file.
    fn theme_path(&self) -> PathBuf
    {
        self.config_dir.join(THEME_FILE)
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn names_round_trip()
    {
        assert_eq!("dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!(" Light\n".parse::<Theme>().unwrap(), Theme::Light);
        assert!("sepia".parse::<Theme>().is_err());
        assert_eq!(Theme::Dark.to_string(), "dark");
    }

    #[test]
    fn toggling_flips()
    {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }

    #[test]
    fn store_defaults_to_light()
    {
        let dir = tempfile::tempdir().unwrap();
        let store = ThemeStore::in_dir(&dir.path().join("missing"));

        assert_eq!(store.get(), Theme::Light);
    }

    #[test]
    fn store_persists_and_clears()
    {
        let dir = tempfile::tempdir().unwrap();
        let store = ThemeStore::in_dir(&dir.path().join("folio"));

        assert_eq!(store.toggle().unwrap(), Theme::Dark);
        assert_eq!(ThemeStore::in_dir(store.config_dir()).get(), Theme::Dark);

        store.clear().unwrap();
        assert_eq!(store.get(), Theme::Light);
        store.clear().unwrap();
    }

    #[test]
    fn garbage_preference_reads_as_light()
    {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(THEME_FILE), "plaid").unwrap();

        assert_eq!(ThemeStore::in_dir(dir.path()).get(), Theme::Light);
    }
}

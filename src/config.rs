//! Startup settings and the fixed layout constants of the form.

use std::env::{self, VarError};
use std::path::PathBuf;

use crate::goods::FIRST_PAGE_ROWS;
use crate::ConfigError;

pub const DEFAULT_LOGO_PATH: &str = "static/monfreight_logo.png";
pub const DEFAULT_OFFICE_EMAIL: &str = "info@monfreight.com.au";
pub const DEFAULT_FROM_EMAIL: &str = "Mon Freight <no-reply@monfreight.com.au>";

/// Where assets live and who mail goes to. Read once at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Directory holding `NotoSans-Regular.ttf` and `NotoSans-Bold.ttf`. Without one
    /// the built-in Helvetica faces are used.
    pub fonts_dir: Option<PathBuf>,
    /// A logo that doesn't exist is the same as no logo
    pub logo_path: Option<PathBuf>,
    /// Credential for the email provider; only ever handed to a dispatcher
    pub api_key: Option<String>,
    pub office_email: String,
    pub from_email: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            fonts_dir: None,
            logo_path: Some(PathBuf::from(DEFAULT_LOGO_PATH)),
            api_key: None,
            office_email: DEFAULT_OFFICE_EMAIL.to_string(),
            from_email: DEFAULT_FROM_EMAIL.to_string(),
        }
    }
}

fn var(name: &'static str) -> Result<Option<String>, ConfigError> {
    match env::var(name) {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode { name }),
    }
}

fn non_empty_var(name: &'static str) -> Result<Option<String>, ConfigError> {
    match var(name)? {
        Some(value) if value.trim().is_empty() => Err(ConfigError::Empty { name }),
        value => Ok(value.map(|v| v.trim().to_string())),
    }
}

impl Settings {
    /// Read `CP72_FONTS_DIR`, `CP72_LOGO_PATH`, `RESEND_API_KEY`, `CP72_OFFICE_EMAIL`
    /// and `CP72_FROM_EMAIL`, falling back to [Settings::default] for any that are
    /// unset.
    pub fn from_env() -> Result<Settings, ConfigError> {
        let defaults = Settings::default();
        let settings = Settings {
            fonts_dir: non_empty_var("CP72_FONTS_DIR")?.map(PathBuf::from),
            logo_path: non_empty_var("CP72_LOGO_PATH")?
                .map(PathBuf::from)
                .or(defaults.logo_path),
            api_key: var("RESEND_API_KEY")?.filter(|key| !key.trim().is_empty()),
            office_email: non_empty_var("CP72_OFFICE_EMAIL")?.unwrap_or(defaults.office_email),
            from_email: non_empty_var("CP72_FROM_EMAIL")?.unwrap_or(defaults.from_email),
        };
        log::debug!(
            "settings: fonts {:?}, logo {:?}, email {}",
            settings.fonts_dir,
            settings.logo_path,
            if settings.api_key.is_some() {
                "configured"
            } else {
                "not configured"
            }
        );
        Ok(settings)
    }
}

/// Layout constants of the CP72 template
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Template {
    /// Goods rows drawn on page 1; the rest go on page 2
    pub first_page_rows: usize,
    /// Characters per line when wrapping addresses
    pub address_wrap: usize,
}

impl Default for Template {
    fn default() -> Self {
        Template {
            first_page_rows: FIRST_PAGE_ROWS,
            address_wrap: 95,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_printed_form() {
        let settings = Settings::default();
        assert_eq!(settings.office_email, "info@monfreight.com.au");
        assert_eq!(settings.from_email, "Mon Freight <no-reply@monfreight.com.au>");
        assert_eq!(
            settings.logo_path.as_deref(),
            Some(std::path::Path::new("static/monfreight_logo.png"))
        );
        assert!(settings.fonts_dir.is_none());
        assert!(settings.api_key.is_none());

        let template = Template::default();
        assert_eq!(template.first_page_rows, 12);
        assert_eq!(template.address_wrap, 95);
    }

    // all environment handling lives in one test so parallel tests can't race on it
    #[test]
    fn reads_environment() {
        env::set_var("CP72_FONTS_DIR", "/opt/fonts");
        env::set_var("CP72_OFFICE_EMAIL", " office@example.com ");
        env::remove_var("CP72_LOGO_PATH");
        env::remove_var("CP72_FROM_EMAIL");
        env::set_var("RESEND_API_KEY", "");

        let settings = Settings::from_env().unwrap();
        assert_eq!(settings.fonts_dir, Some(PathBuf::from("/opt/fonts")));
        assert_eq!(settings.office_email, "office@example.com");
        assert_eq!(settings.from_email, DEFAULT_FROM_EMAIL);
        assert_eq!(settings.logo_path, Some(PathBuf::from(DEFAULT_LOGO_PATH)));
        assert!(settings.api_key.is_none());

        env::set_var("CP72_FROM_EMAIL", "   ");
        assert!(matches!(
            Settings::from_env(),
            Err(ConfigError::Empty {
                name: "CP72_FROM_EMAIL"
            })
        ));

        for name in [
            "CP72_FONTS_DIR",
            "CP72_OFFICE_EMAIL",
            "CP72_FROM_EMAIL",
            "RESEND_API_KEY",
        ] {
            env::remove_var(name);
        }
    }
}

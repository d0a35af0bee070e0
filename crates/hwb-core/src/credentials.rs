//! Startup gate for the three secrets the bot cannot run without.

use tracing::error;

pub const PRACTICUM_TOKEN: &str = "PRACTICUM_TOKEN";
pub const TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";
pub const TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";

/// Raw secrets as read from the environment, before any validation.
#[derive(Clone, Debug, Default)]
pub struct Credentials {
    pub practicum_token: Option<String>,
    pub telegram_token: Option<String>,
    pub telegram_chat_id: Option<String>,
}

impl Credentials {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            practicum_token: lookup(PRACTICUM_TOKEN),
            telegram_token: lookup(TELEGRAM_TOKEN),
            telegram_chat_id: lookup(TELEGRAM_CHAT_ID),
        }
    }
}

/// Names of the secrets that are absent or blank.
pub fn missing_tokens(creds: &Credentials) -> Vec<&'static str> {
    [
        (PRACTICUM_TOKEN, &creds.practicum_token),
        (TELEGRAM_TOKEN, &creds.telegram_token),
        (TELEGRAM_CHAT_ID, &creds.telegram_chat_id),
    ]
    .into_iter()
    .filter(|(_, v)| v.as_deref().map_or(true, |s| s.trim().is_empty()))
    .map(|(name, _)| name)
    .collect()
}

/// Returns true iff all three secrets are present. Logs every missing one.
pub fn check_tokens(creds: &Credentials) -> bool {
    let missing = missing_tokens(creds);
    for name in &missing {
        error!("Missing required environment variable: {name}");
    }
    missing.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full() -> Credentials {
        Credentials {
            practicum_token: Some("p".to_string()),
            telegram_token: Some("t".to_string()),
            telegram_chat_id: Some("42".to_string()),
        }
    }

    #[test]
    fn all_present_passes() {
        assert!(check_tokens(&full()));
        assert!(missing_tokens(&full()).is_empty());
    }

    #[test]
    fn reports_each_missing_secret() {
        let creds = Credentials {
            practicum_token: None,
            telegram_token: Some("   ".to_string()),
            ..full()
        };
        assert!(!check_tokens(&creds));
        assert_eq!(missing_tokens(&creds), vec![PRACTICUM_TOKEN, TELEGRAM_TOKEN]);
    }

    #[test]
    fn empty_chat_id_is_missing() {
        let creds = Credentials {
            telegram_chat_id: Some(String::new()),
            ..full()
        };
        assert_eq!(missing_tokens(&creds), vec![TELEGRAM_CHAT_ID]);
    }
}

use std::{fmt, str::FromStr};

/// Telegram destination: a numeric chat id or a public `@channelusername`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ChatId {
    Id(i64),
    Username(String),
}

impl FromStr for ChatId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(id) = s.parse::<i64>() {
            return Ok(Self::Id(id));
        }
        match s.strip_prefix('@') {
            Some(name) if !name.is_empty() && !name.contains(char::is_whitespace) => {
                Ok(Self::Username(s.to_string()))
            }
            _ => Err(format!(
                "expected a numeric chat id or @channelusername, got {s:?}"
            )),
        }
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Username(name) => f.write_str(name),
        }
    }
}

/// Unix timestamp in seconds, as used by the `from_date` query parameter.
pub type Timestamp = i64;

/// Current local clock as a unix timestamp.
pub fn unix_now() -> Timestamp {
    chrono::Utc::now().timestamp()
}

//! Interpretation of the `homework_statuses` payload.
//!
//! The API client hands back raw JSON; everything about its expected shape
//! lives here so the poll loop only ever sees typed results or a `ShapeError`.

use std::{fmt, str::FromStr};

use serde_json::Value;

use crate::{
    domain::Timestamp,
    errors::{Error, ShapeError},
    Result,
};

const HOMEWORKS: &str = "homeworks";
const CURRENT_DATE: &str = "current_date";
const HOMEWORK_NAME: &str = "homework_name";
const STATUS: &str = "status";

/// Review status of a single homework.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    pub fn verdict(self) -> &'static str {
        match self {
            Self::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Self::Reviewing => "Работа взята на проверку ревьюером.",
            Self::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Reviewing => "reviewing",
            Self::Rejected => "rejected",
        }
    }
}

impl FromStr for HomeworkStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "approved" => Ok(Self::Approved),
            "reviewing" => Ok(Self::Reviewing),
            "rejected" => Ok(Self::Rejected),
            other => Err(Error::UnknownStatus(other.to_string())),
        }
    }
}

impl fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single entry of the `homeworks` list, with the fields we care about.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HomeworkRecord {
    pub homework_name: String,
    pub status: HomeworkStatus,
}

impl HomeworkRecord {
    /// Missing keys are reported before wrong types; an unknown status string
    /// is `Error::UnknownStatus`.
    pub fn from_value(value: &Value) -> Result<Self> {
        let obj = value.as_object().ok_or(ShapeError::NotAMapping)?;
        let name = obj
            .get(HOMEWORK_NAME)
            .ok_or(ShapeError::MissingKey(HOMEWORK_NAME))?;
        let status = obj.get(STATUS).ok_or(ShapeError::MissingKey(STATUS))?;

        let homework_name = name.as_str().ok_or(ShapeError::WrongType(HOMEWORK_NAME))?;
        let status = status.as_str().ok_or(ShapeError::WrongType(STATUS))?;

        Ok(Self {
            homework_name: homework_name.to_string(),
            status: status.parse()?,
        })
    }

    pub fn message(&self) -> String {
        format!(
            "Изменился статус проверки работы \"{}\". {}",
            self.homework_name,
            self.status.verdict()
        )
    }
}

/// Validate the payload and return its `homeworks` list unchanged.
///
/// The first element is the most recent update.
pub fn check_response(payload: &Value) -> Result<Vec<Value>> {
    let obj = payload.as_object().ok_or(ShapeError::NotAMapping)?;
    let homeworks = obj
        .get(HOMEWORKS)
        .ok_or(ShapeError::MissingKey(HOMEWORKS))?;
    let list = homeworks
        .as_array()
        .ok_or(ShapeError::NotASequence(HOMEWORKS))?;
    Ok(list.clone())
}

/// Server clock reported alongside the homeworks, if present and numeric.
pub fn current_date(payload: &Value) -> Option<Timestamp> {
    payload.get(CURRENT_DATE).and_then(Value::as_i64)
}

/// Translate a raw homework record into the notification text.
pub fn parse_status(homework: &Value) -> Result<String> {
    HomeworkRecord::from_value(homework).map(|r| r.message())
}

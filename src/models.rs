use std::path::PathBuf;

use clap::{command, Parser};
use serde::Deserialize;

/// A model for describing ARGS of the bot.
/// The config file is optional: credentials are normally taken from the
/// environment, and every [`Config`] field has a default.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long, value_name = "FILE", default_value = "config.json")]
    pub config_json_path: PathBuf,
}

/// Runtime configuration, merged from config.json and the environment.
/// Consists of:
/// 1. Token for the Practicum homework review API
/// 2. Token of the Telegram bot that delivers notifications
/// 3. ID of the chat the notifications go to
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub practicum_token: String,
    #[serde(default)]
    pub telegram_token: String,
    #[serde(default)]
    pub telegram_chat_id: String,
}

impl Config {
    /// Names of the mandatory variables that are unset or empty.
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        [
            ("PRACTICUM_TOKEN", &self.practicum_token),
            ("TELEGRAM_TOKEN", &self.telegram_token),
            ("TELEGRAM_CHAT_ID", &self.telegram_chat_id),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

/// One homework record from the API answer. Only the two fields the notifier
/// inspects are modelled; the rest of the payload is ignored. Both fields are
/// defaulted so that an incomplete record survives decoding and gets rejected
/// later with a precise error.
#[derive(Debug, Deserialize, PartialEq)]
pub struct Homework {
    #[serde(default)]
    pub homework_name: String,
    #[serde(default)]
    pub status: String,
}

/// The validated part of an API answer: the new cursor plus the homework
/// list, newest submission first.
#[derive(Debug, PartialEq)]
pub struct ApiPayload {
    pub current_date: i64,
    pub homeworks: Vec<Homework>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_credentials_lists_empty_fields() {
        let config = Config {
            practicum_token: "y0_secret".to_owned(),
            ..Config::default()
        };
        assert_eq!(
            config.missing_credentials(),
            vec!["TELEGRAM_TOKEN", "TELEGRAM_CHAT_ID"]
        );
    }

    #[test]
    fn missing_credentials_empty_when_all_set() {
        let config = Config {
            practicum_token: "a".to_owned(),
            telegram_token: "b".to_owned(),
            telegram_chat_id: "c".to_owned(),
        };
        assert!(config.missing_credentials().is_empty());
    }
}

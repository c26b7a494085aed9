use log::debug;
use reqwest::Client;
use serde::Serialize;

use crate::errors::SendError;

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// A trait, necessary for every entity that will deliver notification texts
/// to the chat.
#[allow(async_fn_in_trait)]
pub trait MessageSender {
    async fn send_message(&self, text: &str) -> Result<(), SendError>;
}

#[derive(Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// Sends texts to one fixed chat through the Telegram Bot API.
pub struct TelegramSender {
    http_client: Client,
    token: String,
    chat_id: String,
}

impl TelegramSender {
    pub fn new(http_client: Client, token: &str, chat_id: &str) -> Self {
        Self {
            http_client,
            token: token.to_owned(),
            chat_id: chat_id.to_owned(),
        }
    }
}

impl MessageSender for TelegramSender {
    async fn send_message(&self, text: &str) -> Result<(), SendError> {
        debug!("Sending message to chat {}", self.chat_id);
        let url = format!("{}/bot{}/sendMessage", TELEGRAM_API_BASE, self.token);
        self.http_client
            .post(&url)
            .json(&SendMessageRequest {
                chat_id: &self.chat_id,
                text,
            })
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

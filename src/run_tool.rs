use std::time::{Duration, SystemTime, UNIX_EPOCH};

use log::{debug, error, info};

use crate::errors::PollError;
use crate::helpers::{check_response, parse_status};
use crate::message_sender::MessageSender;
use crate::status_getter::StatusGetter;

/// Pause between polls. Unconditional: the loop sleeps this long whether the
/// iteration succeeded, failed or had nothing to report.
pub const RETRY_PERIOD: Duration = Duration::from_secs(600);

/// Memory the loop carries between iterations. Lives only in the process;
/// a restart begins at the current clock with nothing notified yet.
#[derive(Debug, Default)]
pub struct PollState {
    /// Lower bound for the next request, advanced to the server's
    /// `current_date` after every valid answer.
    pub timestamp: i64,
    /// `(homework_name, status)` of the last notified homework.
    pub last_status: Option<(String, String)>,
    /// Text of the last failure notification, kept to suppress repeats.
    /// Cleared by any successful poll.
    pub last_failure: Option<String>,
}

impl PollState {
    /// Fresh state cursored at the current wall clock.
    pub fn new() -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|since_epoch| since_epoch.as_secs() as i64)
            .unwrap_or_default();
        Self {
            timestamp,
            ..Self::default()
        }
    }
}

/// One poll against the API. `Ok(Some(text))` is a fresh notification to
/// deliver, `Ok(None)` means nothing notable happened.
async fn poll_once<SG: StatusGetter>(
    getter: &SG,
    state: &mut PollState,
) -> Result<Option<String>, PollError> {
    let response = getter.get_statuses(state.timestamp).await?;
    let payload = check_response(&response)?;
    state.timestamp = payload.current_date;

    let Some(latest) = payload.homeworks.first() else {
        debug!("No changes in homework statuses");
        return Ok(None);
    };

    let message = parse_status(latest)?;
    let notified = (latest.homework_name.clone(), latest.status.clone());
    if state.last_status.as_ref() == Some(&notified) {
        debug!(
            "Status of \"{}\" did not change since the last notification",
            latest.homework_name
        );
        return Ok(None);
    }
    state.last_status = Some(notified);
    Ok(Some(message))
}

/// Best-effort delivery: a broken notification channel must not stop polling.
async fn notify<MS: MessageSender>(sender: &MS, message: &str) {
    match sender.send_message(message).await {
        Ok(()) => debug!("Message delivered"),
        Err(send_error) => error!("{}", send_error),
    }
}

/// A single iteration of the poll loop, failure handling included. Split from
/// [`run`] so that tests can drive cycles without sleeping.
pub async fn run_iteration<SG: StatusGetter, MS: MessageSender>(
    getter: &SG,
    sender: &MS,
    state: &mut PollState,
) {
    match poll_once(getter, state).await {
        Ok(Some(message)) => {
            state.last_failure = None;
            info!("Homework status changed, notifying the chat");
            notify(sender, &message).await;
        }
        Ok(None) => state.last_failure = None,
        Err(poll_error) => {
            let message = format!("Сбой в работе программы: {}", poll_error);
            error!("{}", message);
            if state.last_failure.as_deref() != Some(message.as_str()) {
                state.last_failure = Some(message.clone());
                notify(sender, &message).await;
            }
        }
    }
}

/// Polls forever at a fixed cadence. Returns only when the process is killed.
pub async fn run<SG: StatusGetter, MS: MessageSender>(getter: SG, sender: MS) {
    let mut state = PollState::new();
    loop {
        run_iteration(&getter, &sender, &mut state).await;
        tokio::time::sleep(RETRY_PERIOD).await;
    }
}

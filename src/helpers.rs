use log::error;
use serde_json::Value;

use crate::errors::PollError;
use crate::models::{ApiPayload, Homework};

/// Maps a review status onto its verdict text. The catalog is closed:
/// anything outside of it is an error, not a silent skip.
pub fn verdict_for_status(status: &str) -> Option<&'static str> {
    match status {
        "approved" => Some("Работа проверена: ревьюеру всё понравилось. Ура!"),
        "reviewing" => Some("Работа взята на проверку ревьюером."),
        "rejected" => Some("Работа проверена: у ревьюера есть замечания."),
        _ => None,
    }
}

/// Checks that a decoded API answer matches the documented layout and pulls
/// out the parts the loop works with. The homework list comes back unchanged
/// and in API order, newest submission first.
pub fn check_response(response: &Value) -> Result<ApiPayload, PollError> {
    let Some(response) = response.as_object() else {
        error!("Response is not a mapping");
        return Err(PollError::UnexpectedShape("response is not a mapping"));
    };
    let Some(homeworks) = response.get("homeworks") else {
        error!("Expected key \"homeworks\" is missing from the response");
        return Err(PollError::MissingKey("homeworks"));
    };
    let Some(homeworks) = homeworks.as_array() else {
        error!("Value under \"homeworks\" is not a list");
        return Err(PollError::UnexpectedShape("homeworks is not a list"));
    };
    let Some(current_date) = response.get("current_date") else {
        error!("Expected key \"current_date\" is missing from the response");
        return Err(PollError::MissingKey("current_date"));
    };
    let Some(current_date) = current_date.as_i64() else {
        error!("Value under \"current_date\" is not an integer");
        return Err(PollError::UnexpectedShape("current_date is not an integer"));
    };

    let homeworks = homeworks
        .iter()
        .map(|homework| serde_json::from_value(homework.clone()))
        .collect::<Result<Vec<Homework>, _>>()?;

    Ok(ApiPayload {
        current_date,
        homeworks,
    })
}

/// Renders the chat message for one homework record.
pub fn parse_status(homework: &Homework) -> Result<String, PollError> {
    let Some(verdict) = verdict_for_status(&homework.status) else {
        error!("Unknown homework status: {}", homework.status);
        return Err(PollError::UnknownStatus(homework.status.clone()));
    };
    if homework.homework_name.is_empty() {
        error!("Expected key \"homework_name\" is missing from the homework");
        return Err(PollError::MissingKey("homework_name"));
    }
    Ok(format!(
        "Изменился статус проверки работы \"{}\". {}",
        homework.homework_name, verdict
    ))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn homework(name: &str, status: &str) -> Homework {
        Homework {
            homework_name: name.to_owned(),
            status: status.to_owned(),
        }
    }

    #[test]
    fn check_response_returns_cursor_and_homeworks() {
        let response = json!({
            "homeworks": [
                {"homework_name": "warhol__hw03_popart", "status": "reviewing"}
            ],
            "current_date": 1_549_962_000
        });

        let payload = check_response(&response).unwrap();
        assert_eq!(payload.current_date, 1_549_962_000);
        assert_eq!(
            payload.homeworks,
            vec![homework("warhol__hw03_popart", "reviewing")]
        );
    }

    #[test]
    fn check_response_keeps_homework_order() {
        let response = json!({
            "homeworks": [
                {"homework_name": "second", "status": "approved"},
                {"homework_name": "first", "status": "rejected"}
            ],
            "current_date": 0
        });

        let payload = check_response(&response).unwrap();
        assert_eq!(payload.homeworks[0].homework_name, "second");
        assert_eq!(payload.homeworks[1].homework_name, "first");
    }

    #[test]
    fn check_response_rejects_non_mapping() {
        let error = check_response(&json!(["not", "a", "mapping"])).unwrap_err();
        assert!(matches!(
            error,
            PollError::UnexpectedShape("response is not a mapping")
        ));
    }

    #[test]
    fn check_response_rejects_missing_homeworks() {
        let error = check_response(&json!({"current_date": 0})).unwrap_err();
        assert!(matches!(error, PollError::MissingKey("homeworks")));
    }

    #[test]
    fn check_response_rejects_non_list_homeworks() {
        let response = json!({"homeworks": "oops", "current_date": 0});
        let error = check_response(&response).unwrap_err();
        assert!(matches!(
            error,
            PollError::UnexpectedShape("homeworks is not a list")
        ));
    }

    #[test]
    fn check_response_rejects_missing_current_date() {
        let error = check_response(&json!({"homeworks": []})).unwrap_err();
        assert!(matches!(error, PollError::MissingKey("current_date")));
    }

    #[test]
    fn check_response_rejects_non_integer_current_date() {
        let response = json!({"homeworks": [], "current_date": "today"});
        let error = check_response(&response).unwrap_err();
        assert!(matches!(
            error,
            PollError::UnexpectedShape("current_date is not an integer")
        ));
    }

    #[test]
    fn parse_status_covers_the_whole_catalog() {
        let cases = [
            (
                "approved",
                "Изменился статус проверки работы \"malevich__hw01\". \
                 Работа проверена: ревьюеру всё понравилось. Ура!",
            ),
            (
                "reviewing",
                "Изменился статус проверки работы \"malevich__hw01\". \
                 Работа взята на проверку ревьюером.",
            ),
            (
                "rejected",
                "Изменился статус проверки работы \"malevich__hw01\". \
                 Работа проверена: у ревьюера есть замечания.",
            ),
        ];
        for (status, expected) in cases {
            let message = parse_status(&homework("malevich__hw01", status)).unwrap();
            assert_eq!(message, expected);
        }
    }

    #[test]
    fn parse_status_is_deterministic() {
        let record = homework("malevich__hw01", "approved");
        assert_eq!(
            parse_status(&record).unwrap(),
            parse_status(&record).unwrap()
        );
    }

    #[test]
    fn parse_status_rejects_unknown_status() {
        let error = parse_status(&homework("malevich__hw01", "burned")).unwrap_err();
        assert!(matches!(error, PollError::UnknownStatus(status) if status == "burned"));
    }

    #[test]
    fn parse_status_rejects_empty_name() {
        let error = parse_status(&homework("", "approved")).unwrap_err();
        assert!(matches!(error, PollError::MissingKey("homework_name")));
    }

    #[test]
    fn parse_status_checks_status_before_name() {
        let error = parse_status(&homework("", "burned")).unwrap_err();
        assert!(matches!(error, PollError::UnknownStatus(_)));
    }
}

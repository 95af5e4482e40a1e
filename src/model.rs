use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One step of the server-computed Euclidean trace. Immutable once received;
/// the client renders it without re-validating the arithmetic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GcdStep {
    #[serde(default)]
    pub step: u32,
    pub a: u64,
    pub b: u64,
    #[serde(default)]
    pub quotient: Option<u64>,
    #[serde(default)]
    pub remainder: Option<u64>,
    #[serde(default)]
    pub operation: Option<String>,
    #[serde(default)]
    pub explanation: Option<String>,
}

impl GcdStep {
    /// Operation label, falling back to "a mod b" when the server omits one.
    pub fn operation_label(&self) -> String {
        match self.operation.as_deref() {
            Some(op) if !op.trim().is_empty() => op.to_string(),
            _ => format!("{} mod {}", self.a, self.b),
        }
    }

    /// Explanation text, with a generated fallback when the server omits one.
    pub fn explanation_text(&self) -> String {
        match self.explanation.as_deref() {
            Some(text) if !text.trim().is_empty() => text.to_string(),
            _ => match (self.quotient, self.remainder) {
                (Some(q), Some(r)) => format!(
                    "Divide {} by {}: quotient {}, remainder {}.",
                    self.a, self.b, q, r
                ),
                _ => format!("Divide {} by {}.", self.a, self.b),
            },
        }
    }
}

/// Response of `POST /gcd/calculate`. The step sequence always has at least
/// one element.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GcdResult {
    pub result: u64,
    pub steps: Vec<GcdStep>,
    pub a: u64,
    pub b: u64,
}

/// Persisted calculation as returned by the history endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryItem {
    pub id: i64,
    pub a: u64,
    pub b: u64,
    pub result: u64,
    pub steps: Vec<GcdStep>,
    pub created_at: String,
}

impl HistoryItem {
    /// View of this item as a calculation result for the visualizer.
    pub fn to_result(&self) -> GcdResult {
        GcdResult {
            result: self.result,
            steps: self.steps.clone(),
            a: self.a,
            b: self.b,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    #[allow(dead_code)]
    #[serde(default)]
    pub token_type: String,
}

/// Playback speed of the step visualizer. The auto-advance delay is
/// 1000ms divided by the speed factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackSpeed {
    Half,
    Normal,
    Double,
}

impl PlaybackSpeed {
    pub fn factor(self) -> f64 {
        match self {
            PlaybackSpeed::Half => 0.5,
            PlaybackSpeed::Normal => 1.0,
            PlaybackSpeed::Double => 2.0,
        }
    }

    /// Delay before the next automatic step advance.
    pub fn delay(self) -> Duration {
        Duration::from_millis((1000.0 / self.factor()).round() as u64)
    }

    pub fn label(self) -> &'static str {
        match self {
            PlaybackSpeed::Half => "0.5x",
            PlaybackSpeed::Normal => "1x",
            PlaybackSpeed::Double => "2x",
        }
    }
}

/// Why the cached session went away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Logout,
    Expired,
}

impl SessionEnd {
    pub fn to_message(self) -> &'static str {
        match self {
            SessionEnd::Logout => "Logged out.",
            SessionEnd::Expired => "Session expired. Please log in again.",
        }
    }
}

/// Events emitted by the service controller and consumed by UI/CLI layers.
#[derive(Debug, Clone)]
pub enum ClientEvent {
    AuthOk {
        email: String,
    },
    SessionCleared {
        reason: SessionEnd,
    },
    CalculationReady {
        // Box to keep ClientEvent small; traces can carry many steps.
        result: Box<GcdResult>,
    },
    HistoryLoaded {
        items: Vec<HistoryItem>,
    },
    HistoryItemLoaded {
        item: Box<HistoryItem>,
    },
    HistoryDeleted {
        id: i64,
    },
    Failed {
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_step(a: u64, b: u64, q: u64, r: u64) -> GcdStep {
        GcdStep {
            step: 1,
            a,
            b,
            quotient: Some(q),
            remainder: Some(r),
            operation: None,
            explanation: None,
        }
    }

    #[test]
    fn operation_label_falls_back_to_mod_notation() {
        let step = bare_step(48, 18, 2, 12);
        assert_eq!(step.operation_label(), "48 mod 18");
    }

    #[test]
    fn operation_label_prefers_server_text() {
        let mut step = bare_step(48, 18, 2, 12);
        step.operation = Some("48 = 18 × 2 + 12".into());
        assert_eq!(step.operation_label(), "48 = 18 × 2 + 12");
    }

    #[test]
    fn explanation_fallback_uses_quotient_and_remainder() {
        let step = bare_step(18, 12, 1, 6);
        assert_eq!(
            step.explanation_text(),
            "Divide 18 by 12: quotient 1, remainder 6."
        );
    }

    #[test]
    fn result_deserializes_from_service_payload() {
        let json = r#"{
            "result": 6,
            "steps": [
                {"step": 1, "a": 48, "b": 18, "quotient": 2, "remainder": 12},
                {"step": 2, "a": 18, "b": 12, "quotient": 1, "remainder": 6},
                {"step": 3, "a": 12, "b": 6, "quotient": 2, "remainder": 0}
            ],
            "a": 48,
            "b": 18
        }"#;
        let result: GcdResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.result, 6);
        assert_eq!(result.steps.len(), 3);
        assert_eq!(result.steps[0].operation_label(), "48 mod 18");
    }

    #[test]
    fn speed_delay_divides_one_second() {
        assert_eq!(PlaybackSpeed::Half.delay(), Duration::from_millis(2000));
        assert_eq!(PlaybackSpeed::Normal.delay(), Duration::from_millis(1000));
        assert_eq!(PlaybackSpeed::Double.delay(), Duration::from_millis(500));
    }
}

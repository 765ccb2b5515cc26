// Live price feed: socket address, connection status, and frame
// classification. The socket itself is owned by the adapter.

use serde_json::Value;

use crate::board::Stamp;
use crate::protocol::{PriceUpdate, PriceValue};

/// Socket URL for an auction. A secure page gets a secure socket.
pub fn socket_url(secure: bool, host: &str, asta_id: &str) -> String {
    let scheme = if secure { "wss://" } else { "ws://" };
    format!("{scheme}{host}/ws/asta/{asta_id}/")
}

/// Observable state of the page's single live connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connecting,
    Open,
    Closed { code: u16 },
    Failed,
}

/// Something that happened on the live connection.
#[derive(Debug, Clone, PartialEq)]
pub enum LiveEvent {
    Opened,
    /// A text frame, stamped when it came off the socket.
    Message { text: String, stamp: Stamp },
    Closed { code: u16 },
    Error(String),
}

/// What a received text frame turned out to be.
#[derive(Debug, Clone, PartialEq)]
pub enum LiveFrame {
    /// A complete price update.
    Update(PriceUpdate),
    /// Valid JSON of some other shape. Dropped without comment.
    Ignored,
    /// Not JSON at all, or a bare `null`.
    Malformed(String),
}

/// Classify a text frame. A frame updates the board only if both
/// `nuovo_prezzo` and `acquirente` are present and truthy (non-null,
/// non-empty, non-zero, not `false`).
pub fn classify(text: &str) -> LiveFrame {
    let value: Value = match serde_json::from_str(text) {
        Ok(v) => v,
        Err(e) => return LiveFrame::Malformed(e.to_string()),
    };
    if value.is_null() {
        return LiveFrame::Malformed("null frame has no fields".to_string());
    }
    let (Some(prezzo), Some(acquirente)) = (value.get("nuovo_prezzo"), value.get("acquirente"))
    else {
        return LiveFrame::Ignored;
    };
    if !is_truthy(prezzo) || !is_truthy(acquirente) {
        return LiveFrame::Ignored;
    }
    LiveFrame::Update(PriceUpdate {
        nuovo_prezzo: match prezzo {
            Value::Number(n) => PriceValue::Number(n.clone()),
            other => PriceValue::Text(display_value(other)),
        },
        acquirente: display_value(acquirente),
    })
}

fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn display_value(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_mirrors_page_scheme() {
        assert_eq!(
            socket_url(false, "localhost:8000", "3"),
            "ws://localhost:8000/ws/asta/3/"
        );
        assert_eq!(
            socket_url(true, "aste.example.it", "3"),
            "wss://aste.example.it/ws/asta/3/"
        );
    }

    #[test]
    fn complete_frame_is_update() {
        let frame = classify(r#"{"nuovo_prezzo": "15.00", "acquirente": "giulia"}"#);
        assert_eq!(
            frame,
            LiveFrame::Update(PriceUpdate {
                nuovo_prezzo: PriceValue::Text("15.00".into()),
                acquirente: "giulia".into(),
            })
        );
    }

    #[test]
    fn numeric_price_kept_as_number() {
        let LiveFrame::Update(u) = classify(r#"{"nuovo_prezzo": 15.5, "acquirente": "g"}"#) else {
            panic!("expected update");
        };
        assert_eq!(u.nuovo_prezzo.to_string(), "15.5");
    }

    #[test]
    fn missing_field_is_ignored() {
        assert_eq!(classify(r#"{"nuovo_prezzo": "15.00"}"#), LiveFrame::Ignored);
        assert_eq!(classify(r#"{"acquirente": "x"}"#), LiveFrame::Ignored);
    }

    #[test]
    fn falsy_fields_are_ignored() {
        assert_eq!(
            classify(r#"{"nuovo_prezzo": null, "acquirente": "x"}"#),
            LiveFrame::Ignored
        );
        assert_eq!(
            classify(r#"{"nuovo_prezzo": "1", "acquirente": ""}"#),
            LiveFrame::Ignored
        );
        assert_eq!(
            classify(r#"{"nuovo_prezzo": 0, "acquirente": "x"}"#),
            LiveFrame::Ignored
        );
    }

    #[test]
    fn non_object_json_is_ignored() {
        assert_eq!(classify("42"), LiveFrame::Ignored);
        assert_eq!(classify(r#"["a"]"#), LiveFrame::Ignored);
    }

    #[test]
    fn null_frame_is_malformed() {
        assert!(matches!(classify("null"), LiveFrame::Malformed(_)));
        assert!(matches!(classify("  null "), LiveFrame::Malformed(_)));
    }

    #[test]
    fn non_json_is_malformed() {
        assert!(matches!(classify("not json"), LiveFrame::Malformed(_)));
        assert!(matches!(classify(""), LiveFrame::Malformed(_)));
    }
}

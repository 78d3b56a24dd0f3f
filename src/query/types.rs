//! Wire types for the `/query` endpoint.

use serde::{Deserialize, Deserializer, Serialize};

/// Request body sent to the query endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    /// The user's message, verbatim.
    pub query: String,
}

/// A retrieved source document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedDocument {
    /// Backend identifier. Accepts a JSON string or number.
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// Document title.
    pub title: String,
    /// Relevance score in `[0, 1]`.
    pub score: f64,
    /// Optional excerpt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
}

/// One bar of the "top related studies" chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyRecord {
    /// Study title.
    pub title: String,
    /// Relevance score in `[0, 1]`.
    pub score: f64,
}

/// Response body of the query endpoint.
///
/// `docs` and `chart` may be absent or `null`; both read as empty lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    /// Answer text for the assistant turn.
    pub answer: String,
    /// Retrieved documents, ranked.
    #[serde(default, deserialize_with = "nullable_list")]
    pub docs: Vec<RetrievedDocument>,
    /// Studies for the relevance chart.
    #[serde(default, deserialize_with = "nullable_list")]
    pub chart: Vec<StudyRecord>,
}

impl QueryResponse {
    /// True when either result list has entries.
    #[must_use]
    pub fn has_results(&self) -> bool {
        !self.docs.is_empty() || !self.chart.is_empty()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Integer(i64),
    Float(f64),
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Integer(n) => n.to_string(),
        RawId::Float(f) => f.to_string(),
    })
}

fn nullable_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_full_response() {
        let body = json!({
            "answer": "Curiosity landed in 2012.",
            "docs": [
                { "id": "a1", "title": "MSL Overview", "score": 0.923, "snippet": "Gale crater..." },
                { "id": 7, "title": "Rover Mobility", "score": 0.5 }
            ],
            "chart": [{ "title": "Wheel Wear Study", "score": 0.66 }]
        });

        let parsed: QueryResponse = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.answer, "Curiosity landed in 2012.");
        assert_eq!(parsed.docs.len(), 2);
        assert_eq!(parsed.docs[0].snippet.as_deref(), Some("Gale crater..."));
        assert_eq!(parsed.docs[1].id, "7");
        assert!(parsed.docs[1].snippet.is_none());
        assert_eq!(parsed.chart[0].title, "Wheel Wear Study");
        assert!(parsed.has_results());
    }

    #[test]
    fn missing_or_null_lists_are_empty() {
        let parsed: QueryResponse =
            serde_json::from_value(json!({ "answer": "hi", "docs": null })).unwrap();
        assert!(parsed.docs.is_empty());
        assert!(parsed.chart.is_empty());
        assert!(!parsed.has_results());
    }

    #[test]
    fn missing_answer_is_rejected() {
        let parsed = serde_json::from_value::<QueryResponse>(json!({ "docs": [] }));
        assert!(parsed.is_err());
    }

    #[test]
    fn request_serializes_as_query_object() {
        let body = serde_json::to_value(QueryRequest {
            query: "Mars rovers".into(),
        })
        .unwrap();
        assert_eq!(body, json!({ "query": "Mars rovers" }));
    }
}

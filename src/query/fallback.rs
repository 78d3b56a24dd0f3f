//! Canned content shown when the query endpoint cannot be reached.

use super::types::{RetrievedDocument, StudyRecord};
use crate::session::Notice;

/// Toast title shown when demo content is substituted.
pub const DEMO_NOTICE_TITLE: &str = "Demo Mode";

/// Toast body shown when demo content is substituted.
pub const DEMO_NOTICE_DESCRIPTION: &str = "Backend not connected. Showing demo data.";

/// Assistant reply used in place of a real answer. Echoes the query.
#[must_use]
pub fn demo_answer(query: &str) -> String {
    format!(
        "I understand you're asking about \"{query}\". This is a demo response since the \
         backend isn't connected yet. The RAG system would typically retrieve relevant NASA \
         documents and provide research-backed answers about space missions, technology, and \
         scientific discoveries."
    )
}

/// The three placeholder documents.
#[must_use]
pub fn demo_documents() -> Vec<RetrievedDocument> {
    [
        (
            "1",
            "Apollo Mission Technical Report",
            0.92,
            "Comprehensive analysis of lunar mission objectives and outcomes...",
        ),
        (
            "2",
            "Mars Exploration Program Overview",
            0.87,
            "Current and future Mars exploration initiatives and rover missions...",
        ),
        (
            "3",
            "International Space Station Research",
            0.81,
            "Scientific experiments and international collaboration in space...",
        ),
    ]
    .into_iter()
    .map(|(id, title, score, snippet)| RetrievedDocument {
        id: id.to_string(),
        title: title.to_string(),
        score,
        snippet: Some(snippet.to_string()),
    })
    .collect()
}

/// The four placeholder studies.
#[must_use]
pub fn demo_studies() -> Vec<StudyRecord> {
    [
        ("Lunar Sample Analysis", 0.89),
        ("Mars Soil Composition", 0.85),
        ("Solar Panel Efficiency", 0.78),
        ("Rocket Propulsion Systems", 0.72),
    ]
    .into_iter()
    .map(|(title, score)| StudyRecord {
        title: title.to_string(),
        score,
    })
    .collect()
}

/// The "demo mode" toast.
#[must_use]
pub fn demo_notice() -> Notice {
    Notice {
        title: DEMO_NOTICE_TITLE.to_string(),
        description: DEMO_NOTICE_DESCRIPTION.to_string(),
    }
}

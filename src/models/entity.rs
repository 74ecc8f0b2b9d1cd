use serde::Serialize;

/// A maximal run of tokens sharing one NER tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct NamedEntity {
    #[serde(rename = "type")]
    pub entity_type: String,
    /// Id of the first token in the run.
    pub start: String,
    /// Id of the last token in the run.
    pub end: String,
    /// Space-joined surface words of the run.
    pub text: String,
}

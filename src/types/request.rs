//! Inbound request types.

use serde::{Deserialize, Deserializer, Serialize};

use crate::types::{Error, Result};

/// Target model variant for a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Model {
    #[serde(rename = "gpt-3.5")]
    Gpt35,
    #[serde(rename = "gpt-4")]
    Gpt4,
}

impl Model {
    /// Query-string suffix appended to the target base URL when opening a
    /// session scoped to this model.
    pub fn query_suffix(self) -> &'static str {
        match self {
            Model::Gpt35 => "?&model=gpt-3.5",
            Model::Gpt4 => "?&model=gpt-4",
        }
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Model::Gpt35 => f.write_str("gpt-3.5"),
            Model::Gpt4 => f.write_str("gpt-4"),
        }
    }
}

/// A question to run through the resolver pipeline.
///
/// The shape matches what the submitting UI sends: the agent count may
/// arrive as a JSON number or as a numeric string (form controls report
/// their value as a string).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    pub question: String,
    pub model: Model,
    /// Number of independent agent sessions to fan the question out to.
    #[serde(alias = "agentCount", deserialize_with = "lenient_agent_count")]
    pub agents: usize,
}

impl Request {
    pub fn new(question: impl Into<String>, model: Model, agents: usize) -> Self {
        Self {
            question: question.into(),
            model,
            agents,
        }
    }

    /// Defensive validation. The submitting UI checks for an empty question
    /// before sending, but the pipeline rejects invalid calls regardless.
    pub fn validate(&self) -> Result<()> {
        if self.question.trim().is_empty() {
            return Err(Error::InvalidRequest(
                "question must not be empty".to_string(),
            ));
        }
        if self.agents == 0 {
            return Err(Error::InvalidRequest(
                "agent count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Accept the agent count as a positive integer or a numeric string.
fn lenient_agent_count<'de, D>(deserializer: D) -> std::result::Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    struct CountVisitor;

    impl serde::de::Visitor<'_> for CountVisitor {
        type Value = usize;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            f.write_str("a positive integer or a numeric string")
        }

        fn visit_u64<E: serde::de::Error>(self, v: u64) -> std::result::Result<usize, E> {
            usize::try_from(v).map_err(E::custom)
        }

        fn visit_i64<E: serde::de::Error>(self, v: i64) -> std::result::Result<usize, E> {
            usize::try_from(v).map_err(E::custom)
        }

        fn visit_str<E: serde::de::Error>(self, v: &str) -> std::result::Result<usize, E> {
            v.trim().parse::<usize>().map_err(E::custom)
        }
    }

    deserializer.deserialize_any(CountVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_query_suffixes() {
        assert_eq!(Model::Gpt35.query_suffix(), "?&model=gpt-3.5");
        assert_eq!(Model::Gpt4.query_suffix(), "?&model=gpt-4");
    }

    #[test]
    fn agent_count_accepts_number() {
        let request: Request =
            serde_json::from_str(r#"{"question":"q","model":"gpt-4","agents":3}"#).unwrap();
        assert_eq!(request.agents, 3);
        assert_eq!(request.model, Model::Gpt4);
    }

    #[test]
    fn agent_count_accepts_numeric_string() {
        let request: Request =
            serde_json::from_str(r#"{"question":"q","model":"gpt-3.5","agents":"3"}"#).unwrap();
        assert_eq!(request.agents, 3);
        assert_eq!(request.model, Model::Gpt35);
    }

    #[test]
    fn agent_count_rejects_garbage_string() {
        let result: std::result::Result<Request, _> =
            serde_json::from_str(r#"{"question":"q","model":"gpt-4","agents":"many"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn validate_rejects_blank_question() {
        let request = Request::new("   ", Model::Gpt35, 2);
        assert!(matches!(request.validate(), Err(Error::InvalidRequest(_))));
    }

    #[test]
    fn validate_rejects_zero_agents() {
        let request = Request::new("What is 2+2?", Model::Gpt35, 0);
        assert!(matches!(request.validate(), Err(Error::InvalidRequest(_))));
    }

    #[test]
    fn validate_accepts_minimal_request() {
        let request = Request::new("What is 2+2?", Model::Gpt35, 1);
        assert!(request.validate().is_ok());
    }
}

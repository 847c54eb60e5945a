use std::path::Path;

use anyhow::{Context, Result};

use crate::models::EngineTranscript;

/// Parse a diarization engine JSON file into an engine transcript.
pub fn parse_engine_file(path: &Path) -> Result<EngineTranscript> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {:?}", path))?;
    parse_engine_json(&content)
}

/// Parse diarization engine JSON: a `{"tokens": [...]}` envelope where each
/// token carries a time range, text, confidence and a raw speaker tag.
pub fn parse_engine_json(json: &str) -> Result<EngineTranscript> {
    serde_json::from_str(json).context("Failed to parse engine JSON")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "tokens": [
            {"start_time": 0.0, "end_time": 0.4, "text": "hello", "confidence": 0.92, "speaker": "spk_0"},
            {"start_time": 0.5, "end_time": 0.9, "text": "there", "confidence": 0.88, "speaker": "spk_1"}
        ]
    }"#;

    #[test]
    fn test_parse_engine_json() {
        let transcript = parse_engine_json(SAMPLE).unwrap();
        assert_eq!(transcript.tokens.len(), 2);
        assert_eq!(transcript.tokens[0].text, "hello");
        assert_eq!(transcript.tokens[1].speaker, "spk_1");
        assert!((transcript.tokens[0].confidence - 0.92).abs() < 1e-9);
    }

    #[test]
    fn test_parse_engine_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let transcript = parse_engine_file(file.path()).unwrap();
        assert_eq!(transcript.tokens.len(), 2);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(parse_engine_json("{not json").is_err());
        assert!(parse_engine_json(r#"{"tokens": [{"text": "x"}]}"#).is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(parse_engine_file(Path::new("/nonexistent/input.json")).is_err());
    }
}

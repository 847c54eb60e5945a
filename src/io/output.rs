use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::NarrativeOutput;
use crate::pipeline::PipelineArtifacts;

/// Write the rendered narrative text to a file, with a trailing newline.
pub fn write_narrative(narrative: &NarrativeOutput, path: &Path) -> Result<()> {
    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create file: {:?}", path))?;
    file.write_all(narrative.content.as_bytes())
        .context("Failed to write narrative")?;
    file.write_all(b"\n").context("Failed to write narrative")?;
    Ok(())
}

/// Write the full pipeline artifacts as pretty-printed JSON.
pub fn write_artifacts(artifacts: &PipelineArtifacts, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create file: {:?}", path))?;
    serde_json::to_writer_pretty(file, artifacts).context("Failed to write artifacts JSON")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NarrativeFormat, NarrativeMetadata};

    #[test]
    fn test_write_narrative() {
        let narrative = NarrativeOutput {
            format: NarrativeFormat::RolePrefixed,
            content: "Clinician: Hello.\nPatient: Hi.".to_string(),
            metadata: NarrativeMetadata::default(),
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("narrative.txt");
        write_narrative(&narrative, &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "Clinician: Hello.\nPatient: Hi.\n");
    }

    #[test]
    fn test_write_to_bad_path_is_an_error() {
        let narrative = NarrativeOutput {
            format: NarrativeFormat::SingleBlock,
            content: String::new(),
            metadata: NarrativeMetadata::default(),
        };
        assert!(write_narrative(&narrative, Path::new("/nonexistent/dir/out.txt")).is_err());
    }
}

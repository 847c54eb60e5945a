use std::collections::BTreeSet;

use crate::config::NarrativeConfig;
use crate::lexicon::{Language, Lexicons};
use crate::models::{
    NarrativeFormat, NarrativeMetadata, NarrativeOutput, Role, Turn, TurnStats,
};

/// Render turns into the final narrative text.
///
/// Each turn becomes one line. With at most `single_block_threshold`
/// distinct roles the lines are unlabeled; otherwise each carries a
/// localized `<Label>: ` prefix. In both formats, turns at or above the
/// paragraph-break duration are followed by a blank line, marking natural
/// pauses for the reader; trailing blank lines are trimmed.
pub fn render(
    turns: &[Turn],
    stats: &TurnStats,
    config: &NarrativeConfig,
    lexicons: &Lexicons,
    language: Language,
) -> NarrativeOutput {
    let distinct_roles: BTreeSet<&str> = turns
        .iter()
        .map(|t| match t.role {
            Role::Patient => "patient",
            Role::Clinician => "clinician",
        })
        .collect();

    let format = if distinct_roles.len() <= config.single_block_threshold {
        NarrativeFormat::SingleBlock
    } else {
        NarrativeFormat::RolePrefixed
    };

    let mut blocks: Vec<String> = Vec::with_capacity(turns.len());
    for turn in turns {
        let text = format_turn_text(&turn.text);
        let line = match format {
            NarrativeFormat::SingleBlock => text,
            NarrativeFormat::RolePrefixed => {
                let label = lexicons.labels.label(turn.role, language);
                format!("{label}: {text}")
            }
        };
        let mut block = wrap_text(&line, config.max_line_length);
        if turn.duration() >= config.paragraph_break_sec {
            block.push('\n');
        }
        blocks.push(block);
    }
    let content = blocks.join("\n").trim_end().to_string();

    let word_count = turns
        .iter()
        .map(|t| t.text.split_whitespace().count())
        .sum();

    NarrativeOutput {
        format,
        content,
        metadata: NarrativeMetadata {
            total_speakers: distinct_roles.len(),
            patient_turns: stats.patient_turns,
            clinician_turns: stats.clinician_turns,
            total_duration: stats.total_duration,
            word_count,
        },
    }
}

/// Normalize one turn's text for presentation: trim, capitalize the first
/// letter and terminate with a period unless already punctuated.
pub(crate) fn format_turn_text(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let mut chars = trimmed.chars();
    let mut formatted = match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    };

    if !formatted.ends_with(['.', '!', '?']) {
        formatted.push('.');
    }
    formatted
}

/// Greedy word wrap at `width` characters; 0 disables wrapping. Words
/// longer than the width get a line of their own rather than being split.
pub(crate) fn wrap_text(text: &str, width: usize) -> String {
    if width == 0 {
        return text.to_string();
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + word.chars().count() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines.join("\n")
}

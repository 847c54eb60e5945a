use serde::{Deserialize, Serialize};

use crate::models::Role;

/// Supported transcript languages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Fr,
}

impl Language {
    /// Normalize an engine language code to a supported language.
    /// Unrecognized codes fall back to English.
    pub fn from_code(code: &str) -> Self {
        match code {
            "fr" | "fr-CA" | "fr-FR" => Language::Fr,
            _ => Language::En,
        }
    }
}

/// Localized display labels for roles. The underlying `Role` value is
/// language-independent; labels only affect rendering, never segmentation.
#[derive(Debug, Clone)]
pub struct RoleLabels {
    pub patient_en: String,
    pub clinician_en: String,
    pub patient_fr: String,
    pub clinician_fr: String,
}

impl RoleLabels {
    pub fn label(&self, role: Role, language: Language) -> &str {
        match (role, language) {
            (Role::Patient, Language::En) => &self.patient_en,
            (Role::Clinician, Language::En) => &self.clinician_en,
            (Role::Patient, Language::Fr) => &self.patient_fr,
            (Role::Clinician, Language::Fr) => &self.clinician_fr,
        }
    }
}

impl Default for RoleLabels {
    fn default() -> Self {
        Self {
            patient_en: "Patient".to_string(),
            clinician_en: "Clinician".to_string(),
            patient_fr: "Patient".to_string(),
            clinician_fr: "Clinicien".to_string(),
        }
    }
}

/// Immutable lexicon data injected into the stages at construction time.
///
/// Holding these as owned configuration (rather than module statics) lets a
/// deployment override them per language without global setup/teardown.
#[derive(Debug, Clone)]
pub struct Lexicons {
    /// Hesitation markers stripped by disfluency cleanup (English).
    pub fillers_en: Vec<String>,
    /// Hesitation markers stripped by disfluency cleanup (French).
    pub fillers_fr: Vec<String>,
    /// Cue words/phrases that bias a bucket toward the patient role.
    pub patient_cues: Vec<String>,
    /// Cue words/phrases that bias a bucket toward the clinician role.
    pub clinician_cues: Vec<String>,
    /// Localized role display labels.
    pub labels: RoleLabels,
}

impl Lexicons {
    /// Filler lexicon for the given language.
    pub fn fillers(&self, language: Language) -> &[String] {
        match language {
            Language::En => &self.fillers_en,
            Language::Fr => &self.fillers_fr,
        }
    }
}

impl Default for Lexicons {
    fn default() -> Self {
        let to_vec = |words: &[&str]| words.iter().map(|w| w.to_string()).collect();

        Self {
            fillers_en: to_vec(&["uh", "um", "mmm", "er", "ah"]),
            fillers_fr: to_vec(&["euh", "heu", "ben", "bah", "hum"]),
            patient_cues: to_vec(&[
                // French self-report
                "je", "moi", "mon", "ma", "mes", "j'ai", "j'étais", "j'ai eu",
                // English self-report
                "i", "my", "me", "i'm", "i was", "i had", "i feel", "i think", "i need",
                // Symptom vocabulary
                "douleur", "mal", "souffre", "sensation", "symptôme", "problème",
                "pain", "hurt", "ache", "symptom", "problem", "issue", "feel",
            ]),
            clinician_cues: to_vec(&[
                // Titles and professions
                "docteur", "dr", "médecin", "infirmier", "infirmière", "thérapeute",
                "doctor", "physician", "nurse", "therapist", "specialist",
                // Clinical vocabulary
                "diagnostic", "traitement", "médicament", "prescription", "examen",
                "diagnosis", "treatment", "medication", "exam", "test",
                // Interview question words
                "comment", "depuis", "combien", "où", "quand", "pourquoi",
                "how", "since", "how long", "where", "when", "why", "what",
            ]),
            labels: RoleLabels::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_from_code() {
        assert_eq!(Language::from_code("fr-CA"), Language::Fr);
        assert_eq!(Language::from_code("fr"), Language::Fr);
        assert_eq!(Language::from_code("en-US"), Language::En);
        assert_eq!(Language::from_code("de"), Language::En);
    }

    #[test]
    fn test_role_labels_localized() {
        let labels = RoleLabels::default();
        assert_eq!(labels.label(Role::Clinician, Language::En), "Clinician");
        assert_eq!(labels.label(Role::Clinician, Language::Fr), "Clinicien");
        assert_eq!(labels.label(Role::Patient, Language::Fr), "Patient");
    }

    #[test]
    fn test_fillers_per_language() {
        let lexicons = Lexicons::default();
        assert!(lexicons.fillers(Language::En).iter().any(|f| f == "um"));
        assert!(lexicons.fillers(Language::Fr).iter().any(|f| f == "euh"));
    }
}

use serde::{Deserialize, Serialize};

use super::Bucket;

/// Semantic speaker identity assigned to a bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Patient,
    Clinician,
}

impl Role {
    pub fn other(self) -> Self {
        match self {
            Role::Patient => Role::Clinician,
            Role::Clinician => Role::Patient,
        }
    }
}

/// Bucket-to-role assignment. Display labels are derived per language at
/// render time, never stored here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleMap {
    pub a: Role,
    pub b: Role,
}

impl RoleMap {
    pub fn role_for(&self, bucket: Bucket) -> Role {
        match bucket {
            Bucket::A => self.a,
            Bucket::B => self.b,
        }
    }

    /// Structural inversion: exchanges the two roles.
    pub fn swapped(&self) -> RoleMap {
        RoleMap {
            a: self.a.other(),
            b: self.b.other(),
        }
    }
}

impl Default for RoleMap {
    /// Single-speaker convention: the sole bucket (A) is the patient.
    fn default() -> Self {
        RoleMap {
            a: Role::Patient,
            b: Role::Clinician,
        }
    }
}

/// Final unit of output: a maximal run of same-role segments.
/// Owned by the turn builder once created; immutable afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
    pub t0: f64,
    pub t1: f64,
}

impl Turn {
    /// Duration of this turn in seconds.
    pub fn duration(&self) -> f64 {
        self.t1 - self.t0
    }
}

/// Statistics from turn building.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TurnStats {
    pub total_turns: usize,
    pub patient_turns: usize,
    pub clinician_turns: usize,
    /// Conversation span: `max(t1) - min(t0)` across all turns, not the sum
    /// of individual turn durations (gaps are excluded).
    pub total_duration: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_map_lookup_and_swap() {
        let map = RoleMap {
            a: Role::Patient,
            b: Role::Clinician,
        };
        assert_eq!(map.role_for(Bucket::A), Role::Patient);
        assert_eq!(map.role_for(Bucket::B), Role::Clinician);

        let swapped = map.swapped();
        assert_eq!(swapped.role_for(Bucket::A), Role::Clinician);
        assert_eq!(swapped.role_for(Bucket::B), Role::Patient);
    }

    #[test]
    fn test_role_swap_is_self_inverse() {
        let map = RoleMap {
            a: Role::Clinician,
            b: Role::Patient,
        };
        assert_eq!(map.swapped().swapped(), map);
    }
}

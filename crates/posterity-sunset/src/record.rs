use serde::{Deserialize, Serialize};

use posterity_types::{ActorId, ClusterId, Digest, Timestamp};

use crate::error::SunsetError;

/// Phase machine of the sunset pipeline. Strictly linear, one way:
///
/// `Initiated -> AssetsArchived -> IpTransitioned -> Clustered -> Completed`
///
/// A record only exists once initiation has happened, so the implicit
/// starting phase is `Initiated`. `Pending` names the pre-record state in
/// phase-violation errors. The transition table guarantees that reaching
/// `Completed` means every prior phase ran, in order, exactly once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SunsetPhase {
    Pending,
    Initiated,
    AssetsArchived,
    IpTransitioned,
    Clustered,
    Completed,
}

impl SunsetPhase {
    /// The sole legal successor of this phase, if any.
    pub fn successor(&self) -> Option<SunsetPhase> {
        match self {
            Self::Pending => Some(Self::Initiated),
            Self::Initiated => Some(Self::AssetsArchived),
            Self::AssetsArchived => Some(Self::IpTransitioned),
            Self::IpTransitioned => Some(Self::Clustered),
            Self::Clustered => Some(Self::Completed),
            Self::Completed => None,
        }
    }

    /// Fail unless the pipeline currently sits at `expected`.
    pub fn require(&self, expected: SunsetPhase) -> Result<(), SunsetError> {
        if *self == expected {
            Ok(())
        } else {
            Err(SunsetError::PhaseViolation {
                expected,
                actual: *self,
            })
        }
    }

    /// Step to `next`, which must be this phase's sole successor.
    pub fn advance(self, next: SunsetPhase) -> Result<SunsetPhase, SunsetError> {
        if self.successor() == Some(next) {
            Ok(next)
        } else {
            Err(SunsetError::PhaseViolation {
                expected: next,
                actual: self,
            })
        }
    }
}

impl std::fmt::Display for SunsetPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Initiated => write!(f, "initiated"),
            Self::AssetsArchived => write!(f, "assets_archived"),
            Self::IpTransitioned => write!(f, "ip_transitioned"),
            Self::Clustered => write!(f, "clustered"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

/// The license the creator's works pass into at IP transition. Chosen
/// exactly once, irreversible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PostSunsetLicense {
    Cc0,
    PublicDomain,
    NeutralStewardship,
}

impl std::fmt::Display for PostSunsetLicense {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cc0 => write!(f, "cc0"),
            Self::PublicDomain => write!(f, "public_domain"),
            Self::NeutralStewardship => write!(f, "neutral_stewardship"),
        }
    }
}

/// One archived asset: its original reference, where the archived copy
/// lives, and the digest of the archived bytes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchivedAsset {
    pub asset_ref: String,
    pub locator: String,
    pub digest: Digest,
}

/// Per-creator sunset state. Created at initiation, terminal at
/// `Completed`; the archived list is append-only.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SunsetRecord {
    pub creator: ActorId,
    /// When the execution window opened; the window length is measured
    /// from here.
    pub activated_at: Timestamp,
    pub initiated_at: Timestamp,
    pub emergency: bool,
    pub phase: SunsetPhase,
    pub archived: Vec<ArchivedAsset>,
    pub archive_locator: Option<String>,
    pub license: Option<PostSunsetLicense>,
    pub cluster: Option<ClusterId>,
}

impl SunsetRecord {
    pub fn initiated(
        creator: ActorId,
        activated_at: Timestamp,
        initiated_at: Timestamp,
        emergency: bool,
    ) -> Self {
        Self {
            creator,
            activated_at,
            initiated_at,
            emergency,
            phase: SunsetPhase::Initiated,
            archived: Vec::new(),
            archive_locator: None,
            license: None,
            cluster: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_form_a_single_chain() {
        let chain = [
            SunsetPhase::Pending,
            SunsetPhase::Initiated,
            SunsetPhase::AssetsArchived,
            SunsetPhase::IpTransitioned,
            SunsetPhase::Clustered,
            SunsetPhase::Completed,
        ];
        for pair in chain.windows(2) {
            assert_eq!(pair[0].successor(), Some(pair[1]));
        }
        assert_eq!(SunsetPhase::Completed.successor(), None);
    }

    #[test]
    fn advance_rejects_skips_and_reversals() {
        assert!(SunsetPhase::Initiated
            .advance(SunsetPhase::AssetsArchived)
            .is_ok());
        assert!(matches!(
            SunsetPhase::Initiated.advance(SunsetPhase::IpTransitioned),
            Err(SunsetError::PhaseViolation { .. })
        ));
        assert!(matches!(
            SunsetPhase::Clustered.advance(SunsetPhase::Initiated),
            Err(SunsetError::PhaseViolation { .. })
        ));
        assert!(matches!(
            SunsetPhase::Completed.advance(SunsetPhase::Completed),
            Err(SunsetError::PhaseViolation { .. })
        ));
    }

    #[test]
    fn require_names_both_phases() {
        let err = SunsetPhase::Initiated
            .require(SunsetPhase::Clustered)
            .unwrap_err();
        let text = format!("{err}");
        assert!(text.contains("clustered"));
        assert!(text.contains("initiated"));
    }

    #[test]
    fn license_display() {
        assert_eq!(format!("{}", PostSunsetLicense::Cc0), "cc0");
        assert_eq!(
            format!("{}", PostSunsetLicense::NeutralStewardship),
            "neutral_stewardship"
        );
    }
}

//! Pluggable CLIN completeness rules.

use super::Clin;

/// Decides whether a CLIN carries enough data for its task order to leave
/// the draft state.
pub trait ClinCompletenessPolicy: Send + Sync {
    /// Returns `true` when the CLIN is complete.
    fn is_complete(&self, clin: &Clin) -> bool;
}

/// Default policy: a CLIN is complete once both amounts and the billing
/// category are recorded.
///
/// Number and period of performance are mandatory on every [`Clin`] and are
/// not checked here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequiredClinFields;

impl ClinCompletenessPolicy for RequiredClinFields {
    fn is_complete(&self, clin: &Clin) -> bool {
        clin.total_amount().is_some()
            && clin.obligated_amount().is_some()
            && clin.jedi_clin_type().is_some()
    }
}

impl<F> ClinCompletenessPolicy for F
where
    F: Fn(&Clin) -> bool + Send + Sync,
{
    fn is_complete(&self, clin: &Clin) -> bool {
        self(clin)
    }
}

use crate::{bloom::LogsBloom, error::CheckError};

/// Result of probing one candidate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub struct MembershipResult {
    /// All three probe bits were set. May be a false positive.
    pub possibly_present: bool,
}

impl MembershipResult {
    /// At least one probe bit was clear, so the candidate was never accrued.
    pub fn definitely_absent(self) -> bool {
        !self.possibly_present
    }
}

/// Probe a raw filter for `candidate`.
///
/// The candidate is hashed as-is; whether it really is an address or a topic
/// is the caller's concern. Fails only when `filter` is not 256 bytes.
pub fn test_membership(
    filter: &[u8],
    candidate: &[u8],
) -> Result<MembershipResult, CheckError> {
    let bloom = LogsBloom::from_slice(filter)?;
    Ok(MembershipResult {
        possibly_present: bloom.contains(candidate),
    })
}

/// Conjunctive test: `true` iff every candidate tests positive.
///
/// An empty candidate set is rejected with [`CheckError::NoCandidatesSupplied`]
/// rather than treated as vacuously true.
pub fn test_any<I, C>(filter: &[u8], candidates: I) -> Result<bool, CheckError>
where
    I: IntoIterator<Item = C>,
    C: AsRef<[u8]>,
{
    let bloom = LogsBloom::from_slice(filter)?;
    let mut seen = false;
    let mut all = true;
    for c in candidates {
        seen = true;
        all &= bloom.contains(c.as_ref());
    }
    if !seen {
        return Err(CheckError::NoCandidatesSupplied);
    }
    Ok(all)
}

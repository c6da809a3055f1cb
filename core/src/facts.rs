use intake_common::error::{DiscoveryError, DiscoveryResult};
use intake_common::facts::FactSet;

/// Returns the name and value of the first candidate carrying a usable value.
pub fn first_valid<'a, I, S>(candidates: I, facts: &'a FactSet) -> Option<(S, &'a str)>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    candidates.into_iter().find_map(|name| {
        let value = facts.usable(name.as_ref())?;
        Some((name, value))
    })
}

/// Returns the value of the first candidate fact present with a non-empty
/// value, trying them in order.
///
/// `setting` names where the candidate list came from; it is reported with
/// the full list when nothing matches.
pub fn select_first_valid<'a, S: AsRef<str>>(
    setting: &str,
    candidates: &[S],
    facts: &'a FactSet,
) -> DiscoveryResult<&'a str> {
    first_valid(candidates, facts)
        .map(|(_, value)| value)
        .ok_or_else(|| DiscoveryError::MissingFact {
            setting: setting.to_string(),
            candidates: candidates.iter().map(|c| c.as_ref().to_string()).collect(),
        })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

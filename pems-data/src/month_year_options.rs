//! Keeps the To-select consistent with the From-select.

use pems_core::month_year::MonthYear;

/// Tokens that may be chosen as the To end of the range for `from`, in the
/// order of `all`.
pub fn to_options(all: &[MonthYear], from: &MonthYear) -> Vec<MonthYear> {
    all.iter()
        .filter(|t| MonthYear::compare(from, t))
        .copied()
        .collect()
}

/// The To token to use after the options changed: `current` if it is still
/// offered, otherwise the last option. With no options at all `current` is
/// kept.
pub fn reconcile_to(options: &[MonthYear], current: &MonthYear) -> MonthYear {
    if options.contains(current) {
        *current
    } else {
        options.last().copied().unwrap_or(*current)
    }
}

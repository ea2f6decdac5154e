//! A single-expression conditional selector.

/// Returns `if_true` when `condition` holds, otherwise `if_false`.
///
/// Both values are evaluated by the caller before `choose` runs, whatever
/// `condition` turns out to be. Any side effect in either argument always
/// happens, so this is no replacement for an `if`/`else` whose branches are
/// expensive or effectful.
///
/// # Examples
///
/// ```
/// use generic_sync_map::ternary;
///
/// let retries = 3;
/// let label = ternary::choose(retries == 1, "retry", "retries");
/// assert_eq!(label, "retries");
///
/// // Both arguments are computed up front.
/// let mut calls = 0;
/// let mut count = || { calls += 1; calls };
/// let picked = ternary::choose(true, count(), count());
/// assert_eq!(picked, 1);
/// assert_eq!(calls, 2);
/// ```
#[inline]
pub fn choose<T>(condition: bool, if_true: T, if_false: T) -> T {
    if condition {
        return if_true;
    }

    if_false
}

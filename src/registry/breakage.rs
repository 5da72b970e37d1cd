use super::{ModEntry, ModState};
use crate::logging::log_reconcile;

/// A mod counts as newly broken when its state is exactly `NOT_LOADED` or
/// exactly `NOT_INSTALLED` and it is still visible.
///
/// The comparison is against the whole mask: a mod carrying both bits, or any
/// other bit, is not reported.
fn is_newly_broken(entry: &ModEntry) -> bool {
    (entry.state == ModState::NOT_LOADED || entry.state == ModState::NOT_INSTALLED)
        && !entry.is_hidden
}

/// Hide newly broken mods and describe them in a single message.
///
/// Returns `None` when nothing broke.
pub fn report_broken_mods<'a, I>(mods: I) -> Option<String>
where
    I: IntoIterator<Item = &'a mut ModEntry>,
{
    let mut broken: Vec<&mut ModEntry> = mods.into_iter().filter(|m| is_newly_broken(m)).collect();

    let message = match broken.as_slice() {
        [] => return None,
        [single] => format!("The mod '{}' no longer exists and has been hidden.", single.name),
        many => format!(
            "{} mods no longer exist and have been hidden:\n\n{}",
            many.len(),
            many.iter()
                .map(|m| m.name.as_str())
                .collect::<Vec<_>>()
                .join("\n")
        ),
    };

    for entry in broken.iter_mut() {
        entry.is_hidden = true;
        log_reconcile(&format!("Hiding broken mod '{}' ({:?})", entry.name, entry.state));
    }

    Some(message)
}

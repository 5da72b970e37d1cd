use super::{ModEntry, TagSet};

/// Drop tag references that are not defined in `tags`, keeping the order of the rest
pub fn prune_tags(entry: &mut ModEntry, tags: &TagSet) {
    entry.tags.retain(|tag| tags.contains_key(tag));
}

//! Target list splitting shared by JOIN and PART.

/// Split a `#a,#b` target list into its names.
///
/// Surrounding whitespace is dropped and empty entries are skipped, so
/// `"#a,,#b,"` yields `#a` then `#b`. Order is preserved.
pub fn channel_targets(list: &str) -> impl Iterator<Item = &str> {
    list.split(',').map(str::trim).filter(|name| !name.is_empty())
}

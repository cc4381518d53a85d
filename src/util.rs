use std::iter::repeat;
use std::path::{Path, PathBuf};

pub fn find_first_subpath<P: AsRef<Path>, F: Fn(&Path) -> bool>(
    root: impl AsRef<Path>,
    subpaths: &[P],
    search: F,
) -> Option<PathBuf> {
    subpaths
        .iter()
        .zip(repeat(root.as_ref()))
        .map(|(b, a)| a.join(b))
        .find(|it: &PathBuf| search(it))
}

/// Keeps items whose key falls within `[start, end]`.
///
/// Bounds are compared by magnitude only.
pub fn within_range<T, K, F>(
    items: impl IntoIterator<Item = T>,
    start: K,
    end: K,
    key: F,
) -> impl Iterator<Item = T>
where
    K: PartialOrd + Copy,
    F: Fn(&T) -> K,
{
    items.into_iter().filter(move |it| {
        let k = key(it);
        k >= start && k <= end
    })
}

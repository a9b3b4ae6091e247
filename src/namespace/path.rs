use crate::SuiteError;

/// A validated namespace path, split into `(prefix, segment)` pairs.
///
/// The prefix of a segment is the path up to and including that segment. It
/// is the key a namespace node is stored under, so `"a/b"` and `"b"` never
/// share a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NamespacePath<'p> {
    segments: Vec<(&'p str, &'p str)>,
}

impl<'p> NamespacePath<'p> {
    pub(crate) fn parse(path: &'p str, separator: char) -> Result<Self, SuiteError> {
        if path.is_empty() {
            return Err(SuiteError::invalid(path, "path is empty"));
        }

        let mut segments = Vec::new();
        let mut offset = 0;
        for segment in path.split(separator) {
            if segment.is_empty() {
                return Err(SuiteError::invalid(path, "path contains an empty segment"));
            }
            let end = offset + segment.len();
            segments.push((&path[..end], segment));
            offset = end + separator.len_utf8();
        }

        Ok(Self { segments })
    }

    pub(crate) fn iter(&self) -> impl ExactSizeIterator<Item = (&'p str, &'p str)> + '_ {
        self.segments.iter().copied()
    }

    /// Key of the top-level namespace.
    pub(crate) fn top_key(&self) -> &'p str {
        self.segments[0].0
    }

    /// Whether `key` is this path or one of its ancestors.
    pub(crate) fn has_key(&self, key: &str) -> bool {
        self.segments.iter().any(|(prefix, _)| *prefix == key)
    }

    pub(crate) fn len(&self) -> usize {
        self.segments.len()
    }
}

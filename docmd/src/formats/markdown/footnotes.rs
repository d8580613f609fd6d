//! Footnote collection.
//!
//! References are emitted inline as `[^n] `; definitions are buffered in
//! order of first reference and written after the document body.

/// Ordered store of footnote definitions.
#[derive(Debug, Default)]
pub struct FootnoteStore {
    bodies: Vec<Option<String>>,
}

impl FootnoteStore {
    /// Reserve the next 1-based index. Reserving before the body is
    /// rendered keeps numbering in order of first reference even when the
    /// body itself holds footnotes.
    pub fn reserve(&mut self) -> usize {
        self.bodies.push(None);
        self.bodies.len()
    }

    /// Store the rendered body for a reserved index.
    pub fn fill(&mut self, index: usize, body_markdown: &str) {
        if let Some(slot) = index.checked_sub(1).and_then(|i| self.bodies.get_mut(i)) {
            *slot = Some(flatten_body(body_markdown));
        }
    }

    /// Store a body under the next index and return its reference token.
    pub fn add(&mut self, body_markdown: &str) -> String {
        let index = self.reserve();
        self.fill(index, body_markdown);
        Self::reference(index)
    }

    /// Inline reference token for an index.
    pub fn reference(index: usize) -> String {
        format!("[^{index}] ")
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Definition lines, one per footnote.
    pub fn definitions(&self) -> Vec<String> {
        self.bodies
            .iter()
            .enumerate()
            .map(|(i, body)| format!("[^{}]: {}", i + 1, body.as_deref().unwrap_or_default()))
            .collect()
    }
}

/// Continuation lines of a definition are indented by four spaces.
fn flatten_body(body: &str) -> String {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n    ")
}

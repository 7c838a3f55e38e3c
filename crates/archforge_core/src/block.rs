//! Gated resource block collection.
//!
//! Each resource domain contributes an independently gated, labeled block of
//! HCL text. Fail-soft dependency handling falls out of the gating: a block
//! is contributed only when its own flag and its prerequisites' flags are
//! all set, so an inconsistent selection omits the dependent block instead
//! of emitting a dangling reference.

/// A labeled chunk of resource configuration.
#[derive(Debug, Clone)]
pub struct ResourceBlock {
    pub label: String,
    pub body: String,
}

impl ResourceBlock {
    pub fn new(label: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            body: body.into(),
        }
    }
}

/// Ordered collection of resource blocks produced by one synthesizer run.
#[derive(Debug, Clone, Default)]
pub struct BlockSet {
    blocks: Vec<ResourceBlock>,
}

impl BlockSet {
    pub fn new() -> Self {
        Self { blocks: Vec::new() }
    }

    /// Contribute a block unconditionally.
    pub fn push(&mut self, label: impl Into<String>, body: impl Into<String>) {
        self.blocks.push(ResourceBlock::new(label, body));
    }

    /// Contribute a block only when its gate is open.
    pub fn push_if(&mut self, gate: bool, label: impl Into<String>, body: impl Into<String>) {
        if gate {
            self.push(label, body);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.blocks.iter().map(|b| b.label.as_str()).collect()
    }

    pub fn contains_label(&self, label: &str) -> bool {
        self.blocks.iter().any(|b| b.label == label)
    }

    /// Concatenate block bodies in contribution order.
    pub fn render(&self) -> String {
        self.blocks
            .iter()
            .map(|b| b.body.trim_end())
            .collect::<Vec<_>>()
            .join("\n\n")
            + "\n"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_if_gates_contribution() {
        let mut blocks = BlockSet::new();
        blocks.push_if(true, "networking", "resource \"a\" \"b\" {}");
        blocks.push_if(false, "nat", "resource \"c\" \"d\" {}");

        assert_eq!(blocks.len(), 1);
        assert!(blocks.contains_label("networking"));
        assert!(!blocks.contains_label("nat"));
    }

    #[test]
    fn test_render_preserves_order() {
        let mut blocks = BlockSet::new();
        blocks.push("first", "one");
        blocks.push("second", "two");

        assert_eq!(blocks.render(), "one\n\ntwo\n");
    }
}

//! Recording engine for tests.

use std::cell::RefCell;
use std::rc::Rc;

use remora_dom::Document;

use crate::engine::{DiagramEngine, InitOptions};

/// A single recorded engine call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    Initialize(InitOptions),
    Run,
}

/// Engine double that records every call in order.
///
/// Clones share the same call log, so a handle kept by the test remains
/// valid after the engine moves into a hook.
#[derive(Debug, Clone, Default)]
pub struct MockEngine {
    calls: Rc<RefCell<Vec<EngineCall>>>,
}

impl MockEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded calls, in invocation order.
    #[must_use]
    pub fn calls(&self) -> Vec<EngineCall> {
        self.calls.borrow().clone()
    }

    #[must_use]
    pub fn init_count(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| matches!(call, EngineCall::Initialize(_)))
            .count()
    }

    #[must_use]
    pub fn run_count(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| matches!(call, EngineCall::Run))
            .count()
    }
}

impl DiagramEngine for MockEngine {
    fn initialize(&mut self, options: &InitOptions) {
        self.calls
            .borrow_mut()
            .push(EngineCall::Initialize(options.clone()));
    }

    fn run(&mut self, _document: &mut Document) {
        self.calls.borrow_mut().push(EngineCall::Run);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_calls_in_order() {
        let engine = MockEngine::new();
        let mut handle = engine.clone();
        let mut doc = Document::new("");

        handle.initialize(&InitOptions::default());
        handle.run(&mut doc);
        handle.run(&mut doc);

        assert_eq!(
            engine.calls(),
            vec![
                EngineCall::Initialize(InitOptions::default()),
                EngineCall::Run,
                EngineCall::Run,
            ]
        );
        assert_eq!(engine.init_count(), 1);
        assert_eq!(engine.run_count(), 2);
    }
}

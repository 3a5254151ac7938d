//! Phase sequencing — groups discovered callbacks into the six phase lists

use crate::catalog::ScriptCatalog;
use crate::frame::FrameState;
use cadence_core::{CadenceError, Phase, Result};
use std::fmt;
use std::rc::Rc;

/// A captured script method, callable with the frame state
#[derive(Clone)]
pub struct LifecycleCallback {
    script: &'static str,
    method: &'static str,
    invoke: Rc<dyn Fn(&mut FrameState) -> Result<()>>,
}

impl LifecycleCallback {
    pub fn new(
        script: &'static str,
        method: &'static str,
        invoke: impl Fn(&mut FrameState) -> Result<()> + 'static,
    ) -> Self {
        Self {
            script,
            method,
            invoke: Rc::new(invoke),
        }
    }

    pub fn script(&self) -> &'static str {
        self.script
    }

    pub fn method(&self) -> &'static str {
        self.method
    }

    pub fn call(&self, frame: &mut FrameState) -> Result<()> {
        (self.invoke)(frame)
    }
}

impl fmt::Debug for LifecycleCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.script, self.method)
    }
}

/// The six ordered callback lists of one loop instance
///
/// Lists are filled once by [`PhaseLists::classify`] and only read afterwards.
#[derive(Debug, Clone, Default)]
pub struct PhaseLists {
    lists: [Vec<LifecycleCallback>; 6],
}

impl PhaseLists {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate every (method, phase) pair of the catalog.
    ///
    /// A method satisfying several phases lands in each of them; nothing is
    /// deduplicated across phases. Order follows script registration, then
    /// method declaration.
    pub fn classify(catalog: &ScriptCatalog) -> Self {
        let mut lists = Self::new();
        for entry in catalog.entries() {
            for method in &entry.methods {
                for phase in Phase::ALL {
                    if method.attaches_to(phase) {
                        lists.push(phase, method.callback.clone());
                    }
                }
            }
        }
        lists
    }

    fn push(&mut self, phase: Phase, callback: LifecycleCallback) {
        self.lists[phase.index()].push(callback);
    }

    pub fn get(&self, phase: Phase) -> &[LifecycleCallback] {
        &self.lists[phase.index()]
    }

    pub fn len(&self, phase: Phase) -> usize {
        self.lists[phase.index()].len()
    }

    /// Callbacks across all phases, counting cross-phase duplicates
    pub fn total(&self) -> usize {
        self.lists.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.iter().all(Vec::is_empty)
    }

    /// Invoke every callback of `phase` in order.
    ///
    /// The first failure aborts the phase; later callbacks do not run.
    pub fn dispatch(&self, phase: Phase, frame: &mut FrameState) -> Result<()> {
        for callback in self.get(phase) {
            if let Err(source) = callback.call(frame) {
                return Err(CadenceError::CallbackFailed {
                    script: callback.script().to_string(),
                    method: callback.method().to_string(),
                    phase,
                    frame: frame.frame_count(),
                    source: Box::new(source),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{MethodTable, Script};
    use std::cell::RefCell;

    type Trace = Rc<RefCell<Vec<&'static str>>>;

    struct Alpha {
        trace: Trace,
    }

    impl Alpha {
        fn update(&mut self, _frame: &mut FrameState) -> Result<()> {
            self.trace.borrow_mut().push("alpha.update");
            Ok(())
        }

        fn late_start_update(&mut self, _frame: &mut FrameState) -> Result<()> {
            self.trace.borrow_mut().push("alpha.late_start_update");
            Ok(())
        }

        fn lowercase(&mut self, _frame: &mut FrameState) -> Result<()> {
            self.trace.borrow_mut().push("alpha.lowercase");
            Ok(())
        }
    }

    impl Script for Alpha {
        const NAME: &'static str = "Alpha";

        fn declare(methods: &mut MethodTable<Self>) {
            methods.method("Update", Self::update);
            methods.method("update", Self::lowercase);
            methods.method("Update", Self::late_start_update).mark(Phase::LateStart);
        }
    }

    struct Beta {
        trace: Trace,
        fail: bool,
    }

    impl Beta {
        fn update(&mut self, _frame: &mut FrameState) -> Result<()> {
            if self.fail {
                return Err(CadenceError::script("beta refused"));
            }
            self.trace.borrow_mut().push("beta.update");
            Ok(())
        }

        fn first(&mut self, _frame: &mut FrameState) -> Result<()> {
            self.trace.borrow_mut().push("beta.first");
            Ok(())
        }
    }

    impl Script for Beta {
        const NAME: &'static str = "Beta";

        fn declare(methods: &mut MethodTable<Self>) {
            methods.method("first", Self::first).mark(Phase::EarlyStart);
            methods.method("Update", Self::update);
        }
    }

    fn catalog(trace: &Trace, beta_fails: bool) -> ScriptCatalog {
        let mut catalog = ScriptCatalog::new();
        catalog
            .register(Alpha {
                trace: Rc::clone(trace),
            })
            .register(Beta {
                trace: Rc::clone(trace),
                fail: beta_fails,
            });
        catalog
    }

    #[test]
    fn test_empty_catalog_yields_empty_lists() {
        let lists = PhaseLists::classify(&ScriptCatalog::new());
        assert!(lists.is_empty());
        assert_eq!(lists.total(), 0);

        let mut frame = FrameState::new(30).unwrap();
        for phase in Phase::ALL {
            assert!(lists.dispatch(phase, &mut frame).is_ok());
        }
    }

    #[test]
    fn test_conventional_name_binds_without_marker() {
        let trace = Trace::default();
        let lists = PhaseLists::classify(&catalog(&trace, false));

        let update: Vec<String> = lists.get(Phase::Update).iter().map(|c| format!("{c:?}")).collect();
        assert_eq!(
            update,
            vec!["Alpha::Update", "Alpha::Update", "Beta::Update"]
        );
    }

    #[test]
    fn test_marked_and_named_method_lands_in_both_phases() {
        let trace = Trace::default();
        let lists = PhaseLists::classify(&catalog(&trace, false));
        let mut frame = FrameState::new(30).unwrap();

        assert_eq!(lists.len(Phase::LateStart), 1);
        lists.dispatch(Phase::LateStart, &mut frame).unwrap();
        lists.dispatch(Phase::Update, &mut frame).unwrap();

        assert_eq!(
            *trace.borrow(),
            vec![
                "alpha.late_start_update",
                "alpha.update",
                "alpha.late_start_update",
                "beta.update",
            ]
        );
    }

    #[test]
    fn test_name_match_is_case_sensitive() {
        let trace = Trace::default();
        let lists = PhaseLists::classify(&catalog(&trace, false));
        let mut frame = FrameState::new(30).unwrap();

        for phase in Phase::ALL {
            lists.dispatch(phase, &mut frame).unwrap();
        }
        assert!(!trace.borrow().contains(&"alpha.lowercase"));
    }

    #[test]
    fn test_phase_sizes() {
        let trace = Trace::default();
        let lists = PhaseLists::classify(&catalog(&trace, false));

        assert_eq!(lists.len(Phase::EarlyStart), 1);
        assert_eq!(lists.len(Phase::Start), 0);
        assert_eq!(lists.len(Phase::LateStart), 1);
        assert_eq!(lists.len(Phase::EarlyUpdate), 0);
        assert_eq!(lists.len(Phase::Update), 3);
        assert_eq!(lists.len(Phase::LateUpdate), 0);
        assert_eq!(lists.total(), 5);
    }

    #[test]
    fn test_dispatch_failure_names_the_callback() {
        let trace = Trace::default();
        let lists = PhaseLists::classify(&catalog(&trace, true));
        let mut frame = FrameState::new(30).unwrap();
        frame.advance();

        let err = lists.dispatch(Phase::Update, &mut frame).unwrap_err();
        match err {
            CadenceError::CallbackFailed {
                script,
                method,
                phase,
                frame,
                source,
            } => {
                assert_eq!(script, "Beta");
                assert_eq!(method, "Update");
                assert_eq!(phase, Phase::Update);
                assert_eq!(frame, 1);
                assert!(matches!(*source, CadenceError::Script(_)));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(
            *trace.borrow(),
            vec!["alpha.update", "alpha.late_start_update"]
        );
    }
}

//! Script registration — the catalog that discovery scans
//!
//! A type opts into lifecycle discovery by implementing [`Script`]. Its
//! `declare` function lists the methods the catalog may bind: a method binds to
//! a phase either through an explicit marker or by carrying the phase's
//! conventional name (`"Update"`, `"LateStart"`, ...).

use crate::frame::FrameState;
use crate::sequencer::LifecycleCallback;
use cadence_core::{Phase, Result};
use std::cell::RefCell;
use std::rc::Rc;

/// Signature of a script method: receives the script instance and the frame state
pub type ScriptMethod<S> = fn(&mut S, &mut FrameState) -> Result<()>;

/// Capability marker for types whose methods take part in the run loop
///
/// ```ignore
/// struct Spinner { angle: f64 }
///
/// impl Script for Spinner {
///     const NAME: &'static str = "Spinner";
///
///     fn declare(methods: &mut MethodTable<Self>) {
///         methods.method("Update", Self::update);
///         methods.method("reset", Self::reset).mark(Phase::Start);
///     }
/// }
/// ```
pub trait Script: Sized + 'static {
    /// Human-readable name used in logs and errors
    const NAME: &'static str;

    /// Declare the methods discovery should consider
    fn declare(methods: &mut MethodTable<Self>);
}

/// One declared method and its explicit phase markers
pub struct MethodEntry<S> {
    name: &'static str,
    markers: Vec<Phase>,
    func: ScriptMethod<S>,
}

impl<S> MethodEntry<S> {
    /// Attach this method to `phase` regardless of its name
    pub fn mark(&mut self, phase: Phase) -> &mut Self {
        if !self.markers.contains(&phase) {
            self.markers.push(phase);
        }
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn markers(&self) -> &[Phase] {
        &self.markers
    }
}

/// Methods declared by one script type, in declaration order
pub struct MethodTable<S> {
    entries: Vec<MethodEntry<S>>,
}

impl<S> MethodTable<S> {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Declare a method. It binds by name alone until marked.
    pub fn method(&mut self, name: &'static str, func: ScriptMethod<S>) -> &mut MethodEntry<S> {
        let index = self.entries.len();
        self.entries.push(MethodEntry {
            name,
            markers: Vec::new(),
            func,
        });
        &mut self.entries[index]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A declared method bound to its script instance
pub(crate) struct CatalogMethod {
    pub(crate) name: &'static str,
    pub(crate) markers: Vec<Phase>,
    pub(crate) callback: LifecycleCallback,
}

impl CatalogMethod {
    /// Marker or exact conventional name; each phase is judged on its own
    pub(crate) fn attaches_to(&self, phase: Phase) -> bool {
        self.markers.contains(&phase) || self.name == phase.conventional_name()
    }
}

pub(crate) struct CatalogEntry {
    pub(crate) script: &'static str,
    pub(crate) methods: Vec<CatalogMethod>,
}

/// Registered script instances, in registration order
#[derive(Default)]
pub struct ScriptCatalog {
    entries: Vec<CatalogEntry>,
}

impl ScriptCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a script instance owned by the catalog
    pub fn register<S: Script>(&mut self, script: S) -> &mut Self {
        self.register_shared(Rc::new(RefCell::new(script)))
    }

    /// Register a script instance the caller keeps a handle to
    ///
    /// Every callback captured from the script borrows the same instance
    /// mutably for the duration of its call.
    pub fn register_shared<S: Script>(&mut self, script: Rc<RefCell<S>>) -> &mut Self {
        let mut table = MethodTable::new();
        S::declare(&mut table);

        let methods: Vec<CatalogMethod> = table
            .entries
            .into_iter()
            .map(|entry| {
                let instance = Rc::clone(&script);
                let func = entry.func;
                CatalogMethod {
                    name: entry.name,
                    markers: entry.markers,
                    callback: LifecycleCallback::new(S::NAME, entry.name, move |frame| {
                        func(&mut instance.borrow_mut(), frame)
                    }),
                }
            })
            .collect();

        log::debug!("Registered script {} ({} methods)", S::NAME, methods.len());
        self.entries.push(CatalogEntry {
            script: S::NAME,
            methods,
        });
        self
    }

    /// Number of registered scripts
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered script names, in registration order
    pub fn script_names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|e| e.script).collect()
    }

    pub(crate) fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }
}

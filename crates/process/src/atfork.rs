// crates/process/src/atfork.rs
//! Ordered fork handlers owned by an explicit registry.
//!
//! The registry mirrors `pthread_atfork(3)` ordering: prepare callbacks run in
//! reverse registration order before the fork, parent and child callbacks run
//! in registration order afterwards. Consumers rely on this to acquire locks in
//! prepare and release them in the same nesting after the fork.

use std::fmt;

use logging::DebugFlag;
use nix::unistd::{ForkResult, Pid};
use posix_demos_core::{Error, Result};

use crate::os::fork_process;

/// Maximum number of handler triples a registry accepts by default.
pub const DEFAULT_LIMIT: usize = 32;

type Callback = Box<dyn Fn() + Send + Sync>;

/// One `{prepare, parent, child}` triple. Any phase may be left empty.
#[derive(Default)]
pub struct ForkHandler {
    prepare: Option<Callback>,
    parent: Option<Callback>,
    child: Option<Callback>,
}

impl ForkHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prepare<F>(mut self, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.prepare = Some(Box::new(f));
        self
    }

    pub fn parent<F>(mut self, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.parent = Some(Box::new(f));
        self
    }

    pub fn child<F>(mut self, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.child = Some(Box::new(f));
        self
    }
}

impl fmt::Debug for ForkHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForkHandler")
            .field("prepare", &self.prepare.is_some())
            .field("parent", &self.parent.is_some())
            .field("child", &self.child.is_some())
            .finish()
    }
}

/// Which side of a [`AtforkRegistry::fork`] the caller is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Forked {
    Parent { child: Pid },
    Child,
}

#[derive(Debug)]
pub struct AtforkRegistry {
    handlers: Vec<ForkHandler>,
    limit: usize,
}

impl Default for AtforkRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl AtforkRegistry {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_LIMIT)
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            handlers: Vec::new(),
            limit,
        }
    }

    /// Append a handler triple and return its registration index.
    pub fn register(&mut self, handler: ForkHandler) -> Result<usize> {
        if self.handlers.len() >= self.limit {
            return Err(Error::ResourceExhausted(format!(
                "fork handler limit of {} reached",
                self.limit
            )));
        }
        self.handlers.push(handler);
        let idx = self.handlers.len() - 1;
        tracing::debug!(target: DebugFlag::Atfork.target(), idx, "registered fork handler");
        Ok(idx)
    }

    /// Drop every registered handler.
    pub fn clear(&mut self) {
        self.handlers.clear();
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn run_prepare(&self) {
        for cb in self.handlers.iter().rev().filter_map(|h| h.prepare.as_ref()) {
            cb();
        }
    }

    pub fn run_parent(&self) {
        for cb in self.handlers.iter().filter_map(|h| h.parent.as_ref()) {
            cb();
        }
    }

    pub fn run_child(&self) {
        for cb in self.handlers.iter().filter_map(|h| h.child.as_ref()) {
            cb();
        }
    }

    /// Fork the process, running the registered handlers around the call.
    ///
    /// Parent callbacks also run when the fork itself fails, so locks taken in
    /// prepare are always released.
    pub fn fork(&self) -> Result<Forked> {
        self.run_prepare();
        match fork_process() {
            Ok(ForkResult::Parent { child }) => {
                self.run_parent();
                Ok(Forked::Parent { child })
            }
            Ok(ForkResult::Child) => {
                self.run_child();
                Ok(Forked::Child)
            }
            Err(e) => {
                self.run_parent();
                Err(Error::spawn(e))
            }
        }
    }
}

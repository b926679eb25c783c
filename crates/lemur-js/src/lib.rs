//! Scripting sandbox for the Lemur rendering engine.
//!
//! Uses [Boa](https://boajs.dev/) as the JavaScript engine.
//!
//! # Example
//!
//! ```ignore
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use lemur_js::Sandbox;
//!
//! let document = Rc::new(RefCell::new(lemur_html::parse("<div id='m'>A</div>")));
//! let mut sandbox = Sandbox::new(Rc::clone(&document));
//! let _ = sandbox.execute("document.getElementById('m').innerHTML = 'B';");
//! ```
//!
//! # Surface
//!
//! Scripts see exactly three things:
//! - `console.log(...)` — arguments are converted to strings, joined with
//!   spaces, and appended to the sandbox's log buffer
//! - `document.getElementById(id)` — pre-order search from the document
//!   root; returns an element handle or `null`
//! - element handle `innerHTML` setter — replaces the element's children
//!   with a single text node holding the assigned string (no re-parsing)
//!
//! # Contract
//!
//! One sandbox per load, created after markup parsing and dropped before
//! style resolution; the document is mutable only while the sandbox is
//! live. Evaluation failures are captured as `JS Error: …` log entries and
//! returned as [`ScriptError`]; the pipeline continues past them.

mod globals;

use std::cell::RefCell;
use std::rc::Rc;

use boa_engine::{Context, Source};
use thiserror::Error;

use lemur_dom::DomTree;

/// Shared, mutable handle to the document a sandbox operates on.
///
/// The host and the sandbox both hold one; element handles returned to
/// scripts carry `NodeId` indices into it.
pub type DocumentHandle = Rc<RefCell<DomTree>>;

/// Shared append-only log buffer.
type LogHandle = Rc<RefCell<Vec<String>>>;

/// Failure evaluating a script.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The script threw or failed to parse. The message has already been
    /// appended to the sandbox log with the `JS Error:` prefix.
    #[error("script evaluation failed: {0}")]
    Evaluation(String),
}

/// JavaScript sandbox for one document load.
///
/// Each load gets its own sandbox with its own global object; the sandbox
/// owns the log buffer and shares the document with the host.
pub struct Sandbox {
    /// The Boa JavaScript context.
    context: Context,
    /// Log buffer fed by `console.log` and evaluation failures.
    logs: LogHandle,
}

impl Sandbox {
    /// Create a sandbox over a document with the scripting surface
    /// registered on the global object.
    #[must_use]
    pub fn new(document: DocumentHandle) -> Self {
        let mut context = Context::default();
        let logs: LogHandle = Rc::new(RefCell::new(Vec::new()));
        globals::register_globals(&mut context, document, Rc::clone(&logs));
        Self { context, logs }
    }

    /// Execute JavaScript source code against the document.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Evaluation`] if the script contains syntax
    /// errors or throws an uncaught exception. The failure is also
    /// appended to the log as `JS Error: <message>`, so callers that
    /// ignore the result still surface it.
    pub fn execute(&mut self, source: &str) -> Result<(), ScriptError> {
        match self.context.eval(Source::from_bytes(source)) {
            Ok(_) => Ok(()),
            Err(err) => {
                let message = err.to_string();
                self.logs.borrow_mut().push(format!("JS Error: {message}"));
                Err(ScriptError::Evaluation(message))
            }
        }
    }

    /// A snapshot of the log buffer, in append order.
    #[must_use]
    pub fn logs(&self) -> Vec<String> {
        self.logs.borrow().clone()
    }
}

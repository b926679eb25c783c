//! Global objects exposed to scripts.
//!
//! Every global that needs host state (the document handle, the log
//! buffer) is registered as a closure capturing `Rc` handles. Boa's
//! closure constructor is an `unsafe fn` because closures capturing
//! GC-managed values would need tracing.
//!
//! SAFETY (for every `from_closure` call in this module tree): the
//! captures are `Rc<RefCell<…>>` over plain Rust data — no `JsValue`,
//! `JsObject`, or other GC-traced types — so there is nothing for the
//! collector to trace and the tracing requirement is vacuous.

mod console;
mod document;

use boa_engine::Context;

use crate::{DocumentHandle, LogHandle};

/// Register the scripting surface on a fresh context's global object.
pub(crate) fn register_globals(context: &mut Context, document: DocumentHandle, logs: LogHandle) {
    console::register_console(context, logs);
    document::register_document(context, document);
}

//! Console API implementation.
//!
//! [Console Standard](https://console.spec.whatwg.org/)
//!
//! This module implements the `console` global object with a `log` method
//! that appends to the sandbox's log buffer. The buffer — not stdout — is
//! the observable output; the host decides whether and where to show it.

use boa_engine::object::ObjectInitializer;
use boa_engine::property::Attribute;
use boa_engine::{js_string, Context, JsResult, JsValue, NativeFunction};

use crate::LogHandle;

/// Register the console global object on the context.
///
/// [§ 1.1 Logging](https://console.spec.whatwg.org/#logging)
///
/// Only `console.log(...args)` is provided; the other logging levels are
/// not part of the sandbox surface.
pub(crate) fn register_console(context: &mut Context, logs: LogHandle) {
    // SAFETY: captures only an `Rc<RefCell<Vec<String>>>`; no GC-traced
    // values (see globals/mod.rs).
    let log = unsafe {
        NativeFunction::from_closure(move |_this, args, ctx| {
            let message = format_console_args(args, ctx)?;
            logs.borrow_mut().push(message);
            Ok(JsValue::undefined())
        })
    };

    let console = ObjectInitializer::new(context)
        .function(log, js_string!("log"), 0)
        .build();

    context
        .register_global_property(js_string!("console"), console, Attribute::all())
        .expect("console global should not already exist");
}

/// Format console arguments for the log buffer.
///
/// [§ 2.1 Formatter](https://console.spec.whatwg.org/#formatter)
///
/// Converts each argument to a string and joins them with spaces.
fn format_console_args(args: &[JsValue], context: &mut Context) -> JsResult<String> {
    let strings: Result<Vec<String>, _> = args
        .iter()
        .map(|arg| arg.to_string(context).map(|s| s.to_std_string_escaped()))
        .collect();

    Ok(strings?.join(" "))
}

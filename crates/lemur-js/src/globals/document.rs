//! Document interface implementation.
//!
//! [§ 4.5 Interface Document](https://dom.spec.whatwg.org/#interface-document)
//!
//! The `document` global owns a shared handle to the host's document
//! tree. Element handles returned to scripts are plain objects carrying a
//! [`NodeId`] plus a clone of the handle — stable indices, not pointers —
//! so the host can keep the tree in an arena and rebuild it freely
//! between loads.

use boa_engine::object::{FunctionObjectBuilder, JsObject, ObjectInitializer};
use boa_engine::property::Attribute;
use boa_engine::{js_string, Context, JsArgs, JsValue, NativeFunction};

use lemur_dom::NodeId;

use crate::DocumentHandle;

/// Register the document global object on the context.
///
/// [§ 5.1 getElementById](https://dom.spec.whatwg.org/#dom-nonelementparentnode-getelementbyid)
///
/// "Return the first element in tree order within node's descendants
/// whose ID is elementId; otherwise, return null."
pub(crate) fn register_document(context: &mut Context, document: DocumentHandle) {
    // SAFETY: captures only `Rc<RefCell<DomTree>>`; no GC-traced values
    // (see globals/mod.rs).
    let get_element_by_id = unsafe {
        NativeFunction::from_closure(move |_this, args, ctx| {
            let id = args
                .get_or_undefined(0)
                .to_string(ctx)?
                .to_std_string_escaped();
            let found = document.borrow().get_element_by_id(&id);
            match found {
                Some(node_id) => Ok(element_handle(ctx, document.clone(), node_id).into()),
                None => Ok(JsValue::null()),
            }
        })
    };

    let document_object = ObjectInitializer::new(context)
        .function(get_element_by_id, js_string!("getElementById"), 1)
        .build();

    context
        .register_global_property(js_string!("document"), document_object, Attribute::all())
        .expect("document global should not already exist");
}

/// Build an element handle object for a found element.
///
/// The handle exposes an `innerHTML` setter that replaces the element's
/// children with a single text node holding the assigned string. The
/// string is intentionally not parsed as markup. There is no getter; the
/// sandbox surface only promises assignment.
fn element_handle(context: &mut Context, document: DocumentHandle, node_id: NodeId) -> JsObject {
    // SAFETY: captures an `Rc<RefCell<DomTree>>` and a `Copy` index; no
    // GC-traced values (see globals/mod.rs).
    let set_inner_html = unsafe {
        NativeFunction::from_closure(move |_this, args, ctx| {
            let text = args
                .get_or_undefined(0)
                .to_string(ctx)?
                .to_std_string_escaped();
            document
                .borrow_mut()
                .replace_children_with_text(node_id, &text);
            Ok(JsValue::undefined())
        })
    };
    let setter = FunctionObjectBuilder::new(context.realm(), set_inner_html)
        .name(js_string!("set innerHTML"))
        .length(1)
        .build();

    ObjectInitializer::new(context)
        .accessor(
            js_string!("innerHTML"),
            None,
            Some(setter),
            Attribute::CONFIGURABLE | Attribute::ENUMERABLE,
        )
        .build()
}

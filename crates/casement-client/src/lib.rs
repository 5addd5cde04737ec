//! Client half of the casement window manager widget.
//!
//! Renders one visual box per snapshot entry and turns pointer
//! activations into index-addressed commands. The view is strictly
//! server-authoritative: nothing changes on screen until the next
//! snapshot arrives.

pub mod view;

pub use view::{
    Activation, PointerButton, PointerEvent, WindowBox, WindowManagerView, CLASSNAME,
    WINDOWBOX_CLASSNAME, WINDOWBOX_CLASSNAME_MINIMIZED,
};

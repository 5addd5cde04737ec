//! Peer widgets of the library: the polling refresher, the
//! debounced-keystroke text field and the swappable password field.
//! Thin, mostly declarative wiring next to the window manager core.

pub mod immediate_text;
pub mod password;
pub mod refresher;

pub use immediate_text::{Debouncer, ImmediateTextField, TextFieldState, TextInput, DEFAULT_DELAY_MS};
pub use password::{CheckboxInput, PasswordFieldState, SwappablePasswordField};
pub use refresher::{spawn_refresh_task, Refresher, RefresherState};

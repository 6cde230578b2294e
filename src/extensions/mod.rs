pub mod hooks;

pub use hooks::{HookEvent, WidgetHook, run_hook};

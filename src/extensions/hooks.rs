//! Widget hook seam. Dashboards can attach a callback that observes or
//! rewrites the spec at defined points; a failing hook never takes the
//! chart down with it.

use tracing::warn;

use crate::core::spec::VisualSpec;

/// Points where a widget hook runs.
pub enum HookEvent<'a> {
    /// Fired after the pipeline finished, before the spec reaches the
    /// surface. The hook may rewrite the spec in place.
    InitWidget { spec: &'a mut VisualSpec },
    /// Fired when a data point is clicked, before selection handling.
    /// Returning `true` claims the click and suppresses selection.
    Selection { name: &'a str },
}

/// Dashboard-supplied callback. Errors are reported and swallowed.
pub type WidgetHook =
    Box<dyn FnMut(HookEvent<'_>) -> Result<bool, Box<dyn std::error::Error>> + Send>;

/// Runs the hook if one is attached. Returns whether the hook claimed the
/// event; a missing or failing hook never claims it.
pub fn run_hook(hook: Option<&mut WidgetHook>, event: HookEvent<'_>) -> bool {
    let Some(hook) = hook else {
        return false;
    };
    match hook(event) {
        Ok(claimed) => claimed,
        Err(error) => {
            warn!(%error, "widget hook failed");
            false
        }
    }
}

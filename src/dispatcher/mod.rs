//! Action dispatch.
//!
//! Translates a satisfied action into [`Router`] commands, one command type
//! per action:
//! - `push` resolves the screen ids and pushes them in reverse
//! - `skip`, `checkpoint`, `restore`, `milestone` map one-to-one
//! - `end_interview` completes the run
//! - `do_nothing` issues no command

use std::collections::HashMap;

use tracing::{info, warn};

use crate::config::MissingScreenPolicy;
use crate::error::ScriptError;
use crate::model::{ActionConfig, Screen};
use crate::router::Router;

/// Screen lookup table, keyed by screen id.
pub type ScreenIndex<'a> = HashMap<&'a str, &'a Screen>;

/// Issue the router commands for one action.
///
/// # Errors
///
/// Returns [`ScriptError::MissingScreenReference`] for an unresolved push
/// target under [`MissingScreenPolicy::Strict`], and [`ScriptError::Router`]
/// when the router rejects a command.
pub fn dispatch<R: Router + ?Sized>(
    action_config: &ActionConfig,
    router: &mut R,
    screens: &ScreenIndex<'_>,
    policy: MissingScreenPolicy,
) -> Result<(), ScriptError> {
    info!(action = %action_config.action_type(), "Dispatching action");

    match action_config {
        ActionConfig::Push(screen_ids) => {
            push_in_reverse_order(router, screens, screen_ids, policy)?;
        }
        ActionConfig::Skip(responses) => router.skip(responses)?,
        ActionConfig::Checkpoint(name) => router.checkpoint(name)?,
        ActionConfig::Restore(name) => router.restore(name)?,
        ActionConfig::Milestone(name) => router.milestone(name)?,
        ActionConfig::EndInterview => router.complete()?,
        ActionConfig::DoNothing => {}
    }
    Ok(())
}

/// Push screens so that `screen_ids[0]` is shown first.
///
/// All ids are resolved before anything is pushed, so a strict-mode failure
/// leaves the router untouched.
///
/// # Errors
///
/// See [`dispatch`].
pub fn push_in_reverse_order<R, S>(
    router: &mut R,
    screens: &ScreenIndex<'_>,
    screen_ids: &[S],
    policy: MissingScreenPolicy,
) -> Result<(), ScriptError>
where
    R: Router + ?Sized,
    S: AsRef<str>,
{
    let resolved = resolve_screens(screens, screen_ids, policy)?;
    for screen in resolved.into_iter().rev() {
        router.push(screen)?;
    }
    Ok(())
}

fn resolve_screens<'a, S: AsRef<str>>(
    screens: &ScreenIndex<'a>,
    screen_ids: &[S],
    policy: MissingScreenPolicy,
) -> Result<Vec<&'a Screen>, ScriptError> {
    let mut resolved = Vec::with_capacity(screen_ids.len());
    for id in screen_ids {
        let id = id.as_ref();
        match screens.get(id) {
            Some(screen) => resolved.push(*screen),
            None if policy.is_strict() => {
                return Err(ScriptError::MissingScreenReference {
                    screen_id: id.to_string(),
                });
            }
            None => warn!(screen_id = id, "Dropping reference to unknown screen"),
        }
    }
    Ok(resolved)
}

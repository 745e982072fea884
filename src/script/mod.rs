//! The branching script.
//!
//! [`BranchingScript`] implements the three-method [`Script`] contract the
//! router calls:
//! - `setup` pushes the starting screens once, first declared shown first
//! - `prepare` runs before a screen is shown and does nothing
//! - `process` evaluates the answered screen's actions in order, dispatches
//!   every one that holds, then advances the router
//!
//! # Example
//!
//! ```
//! use interview_branching::config::Config;
//! use interview_branching::model::{ActionConfig, ConditionalAction, Interview, Screen};
//! use interview_branching::script::BranchingScript;
//!
//! let interview = Interview::new("intake", "Intake")
//!     .with_screen(Screen::new("s1", "Welcome").starting_at(0))
//!     .with_screen(Screen::new("s2", "Details"))
//!     .with_action("s1", ConditionalAction::always(ActionConfig::push(["s2"])));
//!
//! let script = BranchingScript::new(&interview, Config::default());
//! assert_eq!(script.actions_for("s1").len(), 1);
//! ```

use tracing::{debug, info_span};

use crate::config::Config;
use crate::dispatcher::{dispatch, push_in_reverse_order, ScreenIndex};
use crate::error::ScriptError;
use crate::evaluator::ConditionEvaluator;
use crate::model::{ConditionalAction, Interview, ResponseData, Screen};
use crate::router::Router;

/// The contract a router drives a script through.
pub trait Script<R: Router + ?Sized> {
    /// Initial transition. Called exactly once per run.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError`] if a starting screen cannot be pushed.
    fn setup(&self, router: &mut R) -> Result<(), ScriptError>;

    /// Hook run before `screen` is shown.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError`] if pre-display work fails.
    fn prepare(&self, router: &R, screen: &Screen, responses: &ResponseData)
        -> Result<(), ScriptError>;

    /// Decide where to go after `screen` has been answered.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError`] if a condition cannot be evaluated or the
    /// router rejects a command. The router is not advanced in that case.
    fn process(
        &self,
        router: &mut R,
        screen: &Screen,
        responses: &ResponseData,
    ) -> Result<(), ScriptError>;
}

/// Script that branches on per-screen conditional actions.
///
/// Holds read-only references into the interview and nothing else, so one
/// instance serves a whole run.
#[derive(Debug, Clone)]
pub struct BranchingScript<'a> {
    interview: &'a Interview,
    screens: ScreenIndex<'a>,
    evaluator: ConditionEvaluator,
    config: Config,
}

impl<'a> BranchingScript<'a> {
    /// Create a script for `interview`.
    #[must_use]
    pub fn new(interview: &'a Interview, config: Config) -> Self {
        let screens = interview
            .screens
            .iter()
            .map(|screen| (screen.id.as_str(), screen))
            .collect();
        Self {
            interview,
            screens,
            evaluator: ConditionEvaluator::new(&config),
            config,
        }
    }

    /// The interview this script runs.
    #[must_use]
    pub const fn interview(&self) -> &'a Interview {
        self.interview
    }

    /// The configuration in effect.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Look up a screen by id.
    #[must_use]
    pub fn screen(&self, id: &str) -> Option<&'a Screen> {
        self.screens.get(id).copied()
    }

    /// Candidate actions for a screen, in declaration order.
    #[must_use]
    pub fn actions_for(&self, screen_id: &str) -> &'a [ConditionalAction] {
        self.interview.actions_for(screen_id)
    }
}

impl<R: Router + ?Sized> Script<R> for BranchingScript<'_> {
    fn setup(&self, router: &mut R) -> Result<(), ScriptError> {
        let starting = self.interview.starting_screen_ids();
        debug!(screens = ?starting, "Pushing starting state");
        push_in_reverse_order(
            router,
            &self.screens,
            &starting,
            self.config.missing_screen_policy,
        )
    }

    fn prepare(
        &self,
        _router: &R,
        _screen: &Screen,
        _responses: &ResponseData,
    ) -> Result<(), ScriptError> {
        Ok(())
    }

    fn process(
        &self,
        router: &mut R,
        screen: &Screen,
        responses: &ResponseData,
    ) -> Result<(), ScriptError> {
        let span = info_span!("process", screen_id = %screen.id);
        let _guard = span.enter();

        for action in self.actions_for(&screen.id) {
            if self.evaluator.evaluate(action, responses)? {
                dispatch(
                    &action.action_config,
                    router,
                    &self.screens,
                    self.config.missing_screen_policy,
                )?;
            }
        }

        router.next()?;
        Ok(())
    }
}

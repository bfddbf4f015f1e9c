//! Generic finite-state-machine dispatcher
//!
//! A `Machine` holds a current state and an immutable, ordered table of
//! transition rules. `dispatch` scans the table linearly and fires the first
//! rule matching (current state, event); `tick` does the same for the
//! automatic `None`-event rules used by timer-like transitions. Table order
//! is the only tie-break, so catch-all rules must come last.
//!
//! The machine's own state lives in `Cell`s so that `dispatch` takes `&self`
//! and can be handed to entry/exit callbacks alongside the mutable game
//! context. A `processing` flag rejects any nested dispatch issued from a
//! callback: the nested call returns `false` without side effects.

use std::cell::Cell;

/// Entry/exit action invoked during a transition.
///
/// Receives the machine (for state queries; nested dispatch is rejected)
/// and the mutable game context.
pub type Callback<S, E, C> = fn(&Machine<S, E, C>, &mut C);

/// One transition rule: "from `from`, on `event`, go to `to`".
///
/// `event == None` marks an automatic transition fired by [`Machine::tick`].
pub struct Transition<S, E, C> {
    pub from: S,
    pub event: Option<E>,
    pub to: S,
    pub on_exit: Option<Callback<S, E, C>>,
    pub on_enter: Option<Callback<S, E, C>>,
}

/// Table-driven state machine over states `S`, events `E` and context `C`.
pub struct Machine<S: 'static, E: 'static, C: 'static> {
    transitions: &'static [Transition<S, E, C>],
    current: Cell<S>,
    processing: Cell<bool>,
}

impl<S, E, C> Machine<S, E, C>
where
    S: Copy + PartialEq,
    E: Copy + PartialEq,
{
    /// Create a machine in `start` state.
    ///
    /// No entry action runs for the start state.
    pub fn new(transitions: &'static [Transition<S, E, C>], start: S) -> Self {
        Self {
            transitions,
            current: Cell::new(start),
            processing: Cell::new(false),
        }
    }

    /// Current state.
    pub fn state(&self) -> S {
        self.current.get()
    }

    /// Process `event`: on the first matching rule run exit action, switch
    /// state, run entry action, and return `true`. No match (or a nested
    /// call while a dispatch is in progress) returns `false` and leaves the
    /// state unchanged.
    pub fn dispatch(&self, ctx: &mut C, event: E) -> bool {
        self.fire(ctx, Some(event))
    }

    /// Fire the automatic (`None`-event) rule for the current state, if any.
    pub fn tick(&self, ctx: &mut C) -> bool {
        self.fire(ctx, None)
    }

    fn fire(&self, ctx: &mut C, event: Option<E>) -> bool {
        if self.processing.get() {
            return false;
        }

        let from = self.current.get();
        let Some(rule) = self
            .transitions
            .iter()
            .find(|t| t.from == from && t.event == event)
        else {
            return false;
        };

        self.processing.set(true);
        if let Some(on_exit) = rule.on_exit {
            on_exit(self, ctx);
        }
        self.current.set(rule.to);
        if let Some(on_enter) = rule.on_enter {
            on_enter(self, ctx);
        }
        self.processing.set(false);

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum St {
        Idle,
        Running,
        Done,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Ev {
        Go,
        Stop,
    }

    #[derive(Default)]
    struct Ctx {
        entered_running: u32,
        exited_running: u32,
        nested_result: Option<bool>,
        probe: u32,
    }

    fn enter_running(_m: &Machine<St, Ev, Ctx>, ctx: &mut Ctx) {
        ctx.entered_running += 1;
    }

    fn exit_running(_m: &Machine<St, Ev, Ctx>, ctx: &mut Ctx) {
        ctx.exited_running += 1;
    }

    const TABLE: &[Transition<St, Ev, Ctx>] = &[
        Transition {
            from: St::Idle,
            event: Some(Ev::Go),
            to: St::Running,
            on_exit: None,
            on_enter: Some(enter_running),
        },
        Transition {
            from: St::Running,
            event: Some(Ev::Stop),
            to: St::Done,
            on_exit: Some(exit_running),
            on_enter: None,
        },
        Transition {
            from: St::Done,
            event: None,
            to: St::Idle,
            on_exit: None,
            on_enter: None,
        },
    ];

    #[test]
    fn dispatch_runs_exit_then_enter() {
        let machine = Machine::new(TABLE, St::Idle);
        let mut ctx = Ctx::default();

        assert!(machine.dispatch(&mut ctx, Ev::Go));
        assert_eq!(machine.state(), St::Running);
        assert_eq!(ctx.entered_running, 1);

        assert!(machine.dispatch(&mut ctx, Ev::Stop));
        assert_eq!(machine.state(), St::Done);
        assert_eq!(ctx.exited_running, 1);
    }

    #[test]
    fn unmatched_event_is_rejected() {
        let machine = Machine::new(TABLE, St::Idle);
        let mut ctx = Ctx::default();

        assert!(!machine.dispatch(&mut ctx, Ev::Stop));
        assert_eq!(machine.state(), St::Idle);
        assert_eq!(ctx.entered_running, 0);
    }

    #[test]
    fn tick_fires_only_auto_rules() {
        let machine = Machine::new(TABLE, St::Idle);
        let mut ctx = Ctx::default();

        assert!(!machine.tick(&mut ctx));
        assert_eq!(machine.state(), St::Idle);

        machine.dispatch(&mut ctx, Ev::Go);
        machine.dispatch(&mut ctx, Ev::Stop);
        assert!(machine.tick(&mut ctx));
        assert_eq!(machine.state(), St::Idle);
    }

    const OVERLAP_TABLE: &[Transition<St, Ev, Ctx>] = &[
        Transition {
            from: St::Idle,
            event: Some(Ev::Go),
            to: St::Running,
            on_exit: None,
            on_enter: None,
        },
        // Overlapping rule; must never fire because the first one wins.
        Transition {
            from: St::Idle,
            event: Some(Ev::Go),
            to: St::Done,
            on_exit: None,
            on_enter: None,
        },
    ];

    #[test]
    fn first_matching_rule_wins() {
        let machine = Machine::new(OVERLAP_TABLE, St::Idle);
        let mut ctx = Ctx::default();

        assert!(machine.dispatch(&mut ctx, Ev::Go));
        assert_eq!(machine.state(), St::Running);
    }

    fn reentrant_enter(m: &Machine<St, Ev, Ctx>, ctx: &mut Ctx) {
        // Nested dispatch from inside a callback must be rejected.
        ctx.nested_result = Some(m.dispatch(ctx, Ev::Stop));
        ctx.probe = 1;
    }

    const REENTRANT_TABLE: &[Transition<St, Ev, Ctx>] = &[
        Transition {
            from: St::Idle,
            event: Some(Ev::Go),
            to: St::Running,
            on_exit: None,
            on_enter: Some(reentrant_enter),
        },
        Transition {
            from: St::Running,
            event: Some(Ev::Stop),
            to: St::Done,
            on_exit: None,
            on_enter: None,
        },
    ];

    #[test]
    fn nested_dispatch_is_rejected() {
        let machine = Machine::new(REENTRANT_TABLE, St::Idle);
        let mut ctx = Ctx::default();

        assert!(machine.dispatch(&mut ctx, Ev::Go));
        assert_eq!(ctx.nested_result, Some(false));
        assert_eq!(ctx.probe, 1);
        // Outer transition completed; nested one caused no state change.
        assert_eq!(machine.state(), St::Running);

        // Guard is released once the outer dispatch finishes.
        assert!(machine.dispatch(&mut ctx, Ev::Stop));
        assert_eq!(machine.state(), St::Done);
    }
}

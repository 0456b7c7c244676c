//! Group player composition
//!
//! An [`AnimationGroupPlayer`] drives a set of child players in parallel
//! through one shared lifecycle. The group installs itself as each child's
//! parent, which hands it cleanup authority: children no longer cancel
//! their native animations autonomously on `destroy`.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::error::Result;
use crate::player::{AnimationPlayer, CallbackList};

/// Plays a set of child players in parallel as one unit
///
/// Transport controls fan out to every child; the group's own `on_done`
/// callbacks fire once all children have reported done (or when the group
/// itself is finished or destroyed).
pub struct AnimationGroupPlayer {
    players: Vec<Rc<dyn AnimationPlayer>>,
    on_start: CallbackList,
    on_done: CallbackList,
    started: Cell<bool>,
    finished: Cell<bool>,
    destroyed: Cell<bool>,
    /// Children that have not reported done this episode
    pending: Cell<usize>,
    parent: RefCell<Option<Weak<dyn AnimationPlayer>>>,
}

impl AnimationGroupPlayer {
    /// Compose the given players into a group
    ///
    /// Sets the group as each child's parent and subscribes to each child's
    /// completion. The subscription holds only a weak reference back to the
    /// group, so dropping the group does not keep the children alive.
    pub fn new(players: Vec<Rc<dyn AnimationPlayer>>) -> Rc<Self> {
        let pending = players.len();
        let group = Rc::new(Self {
            players,
            on_start: CallbackList::new(),
            on_done: CallbackList::new(),
            started: Cell::new(false),
            finished: Cell::new(false),
            destroyed: Cell::new(false),
            pending: Cell::new(pending),
            parent: RefCell::new(None),
        });

        let parent = Rc::downgrade(&group) as Weak<dyn AnimationPlayer>;
        for child in &group.players {
            child.set_parent(parent.clone());
            let weak = Rc::downgrade(&group);
            child.on_done(Box::new(move || {
                if let Some(group) = weak.upgrade() {
                    group.child_done();
                }
            }));
        }
        group
    }

    /// The composed child players
    pub fn players(&self) -> &[Rc<dyn AnimationPlayer>] {
        &self.players
    }

    fn child_done(&self) {
        let left = self.pending.get().saturating_sub(1);
        self.pending.set(left);
        if left == 0 {
            self.on_finish();
        }
    }

    fn on_finish(&self) {
        if !self.finished.get() {
            tracing::debug!("AnimationGroupPlayer: all {} children done", self.players.len());
            self.finished.set(true);
            self.on_done.fire();
        }
    }
}

impl AnimationPlayer for AnimationGroupPlayer {
    fn on_start(&self, callback: Box<dyn FnMut()>) {
        self.on_start.push(callback);
    }

    fn on_done(&self, callback: Box<dyn FnMut()>) {
        self.on_done.push(callback);
    }

    fn init(&self) -> Result<()> {
        for player in &self.players {
            player.init()?;
        }
        Ok(())
    }

    fn play(&self) -> Result<()> {
        for player in &self.players {
            player.play()?;
        }
        if !self.started.get() {
            self.started.set(true);
            self.on_start.fire();
        }
        // An empty group has nothing to wait for
        if self.players.is_empty() {
            self.on_finish();
        }
        Ok(())
    }

    fn pause(&self) -> Result<()> {
        for player in &self.players {
            player.pause()?;
        }
        Ok(())
    }

    fn finish(&self) -> Result<()> {
        if self.finished.get() {
            return Ok(());
        }
        for player in &self.players {
            player.finish()?;
        }
        self.on_finish();
        Ok(())
    }

    fn destroy(&self) -> Result<()> {
        if self.destroyed.get() {
            return Ok(());
        }
        for player in &self.players {
            player.destroy()?;
        }
        self.destroyed.set(true);
        self.on_finish();
        Ok(())
    }

    fn reset(&self) {
        for player in &self.players {
            player.reset();
        }
        self.destroyed.set(false);
        self.finished.set(false);
        self.started.set(false);
        self.pending.set(self.players.len());
    }

    fn has_started(&self) -> bool {
        self.started.get()
    }

    fn set_parent(&self, parent: Weak<dyn AnimationPlayer>) {
        *self.parent.borrow_mut() = Some(parent);
    }

    fn parent(&self) -> Option<Rc<dyn AnimationPlayer>> {
        self.parent.borrow().as_ref().and_then(Weak::upgrade)
    }

    fn set_position(&self, position: f64) {
        for player in &self.players {
            player.set_position(position);
        }
    }

    fn position(&self) -> f64 {
        self.players
            .iter()
            .map(|player| player.position())
            .fold(0.0, f64::max)
    }

    fn total_time(&self) -> f64 {
        self.players
            .iter()
            .map(|player| player.total_time())
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::NoopAnimationPlayer;

    fn noop() -> Rc<dyn AnimationPlayer> {
        Rc::new(NoopAnimationPlayer::new())
    }

    fn counter() -> (Rc<Cell<usize>>, Box<dyn FnMut()>) {
        let count = Rc::new(Cell::new(0));
        let hook = count.clone();
        (count, Box::new(move || hook.set(hook.get() + 1)))
    }

    #[test]
    fn test_group_sets_itself_as_parent() {
        let a = noop();
        let b = noop();
        let group = AnimationGroupPlayer::new(vec![a.clone(), b.clone()]);

        assert!(a.parent().is_some());
        assert!(b.parent().is_some());

        // Children hold the group weakly: a parent slot and a done
        // subscription per child, no strong cycle.
        assert_eq!(Rc::weak_count(&group), 4);
        assert_eq!(Rc::strong_count(&group), 1);
    }

    #[test]
    fn test_group_done_fires_after_all_children() {
        let a = noop();
        let b = noop();
        let group = AnimationGroupPlayer::new(vec![a.clone(), b.clone()]);
        let (count, hook) = counter();
        group.on_done(hook);

        group.play().unwrap();
        a.finish().unwrap();
        assert_eq!(count.get(), 0);

        b.finish().unwrap();
        assert_eq!(count.get(), 1);

        // Group-level finish after the fact does not re-fire
        group.finish().unwrap();
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_group_finish_fans_out_and_fires_once() {
        let a = noop();
        let b = noop();
        let group = AnimationGroupPlayer::new(vec![a, b]);
        let (count, hook) = counter();
        group.on_done(hook);

        group.finish().unwrap();
        group.finish().unwrap();
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_empty_group_finishes_on_play() {
        let group = AnimationGroupPlayer::new(Vec::new());
        let (count, hook) = counter();
        group.on_done(hook);

        group.play().unwrap();
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_group_reset_rearms_children_and_counter() {
        let a = noop();
        let b = noop();
        let group = AnimationGroupPlayer::new(vec![a.clone(), b.clone()]);
        let (count, hook) = counter();
        group.on_done(hook);

        group.finish().unwrap();
        assert_eq!(count.get(), 1);

        group.reset();
        a.finish().unwrap();
        b.finish().unwrap();
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_group_start_fires_once() {
        let group = AnimationGroupPlayer::new(vec![noop()]);
        let (count, hook) = counter();
        group.on_start(hook);

        group.play().unwrap();
        group.pause().unwrap();
        group.play().unwrap();
        assert_eq!(count.get(), 1);
    }
}

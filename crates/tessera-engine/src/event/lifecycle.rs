use std::fmt;

/// Application lifecycle stage.
///
/// Stages are ordered: an application that is `Focused` is also `Visible`,
/// `Alive` and past `Dead`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Stage {
    /// Not yet started, or already shut down.
    Dead,
    /// Running but without a drawable surface.
    Alive,
    /// Has a drawable surface.
    Visible,
    /// Visible and receiving keyboard input.
    Focused,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Dead => "dead",
            Stage::Alive => "alive",
            Stage::Visible => "visible",
            Stage::Focused => "focused",
        };
        f.write_str(name)
    }
}

/// Direction of a lifecycle change relative to a particular stage.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Crossing {
    /// The stage was entered.
    On,
    /// The stage was left.
    Off,
    /// The stage boundary was not crossed.
    None,
}

/// A transition between two lifecycle stages.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct LifecycleEvent {
    pub from: Stage,
    pub to: Stage,
}

impl LifecycleEvent {
    #[inline]
    pub const fn new(from: Stage, to: Stage) -> Self {
        Self { from, to }
    }

    /// Reports whether this transition crosses the boundary of `stage`.
    ///
    /// Going from `Alive` to `Focused` crosses `Visible` on; going from
    /// `Focused` to `Visible` crosses nothing at `Visible`.
    pub fn crosses(self, stage: Stage) -> Crossing {
        match (self.from >= stage, self.to >= stage) {
            (false, true) => Crossing::On,
            (true, false) => Crossing::Off,
            _ => Crossing::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entering_visible_from_alive_crosses_on() {
        let e = LifecycleEvent::new(Stage::Alive, Stage::Visible);
        assert_eq!(e.crosses(Stage::Visible), Crossing::On);
    }

    #[test]
    fn jumping_past_visible_still_crosses_it() {
        let e = LifecycleEvent::new(Stage::Dead, Stage::Focused);
        assert_eq!(e.crosses(Stage::Alive), Crossing::On);
        assert_eq!(e.crosses(Stage::Visible), Crossing::On);
        assert_eq!(e.crosses(Stage::Focused), Crossing::On);
    }

    #[test]
    fn leaving_focus_does_not_cross_visible() {
        let e = LifecycleEvent::new(Stage::Focused, Stage::Visible);
        assert_eq!(e.crosses(Stage::Visible), Crossing::None);
        assert_eq!(e.crosses(Stage::Focused), Crossing::Off);
    }

    #[test]
    fn suspending_crosses_visible_off() {
        let e = LifecycleEvent::new(Stage::Focused, Stage::Alive);
        assert_eq!(e.crosses(Stage::Visible), Crossing::Off);
        assert_eq!(e.crosses(Stage::Alive), Crossing::None);
    }

    #[test]
    fn same_stage_crosses_nothing() {
        let e = LifecycleEvent::new(Stage::Visible, Stage::Visible);
        assert_eq!(e.crosses(Stage::Visible), Crossing::None);
    }
}

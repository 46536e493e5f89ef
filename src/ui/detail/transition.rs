// SPDX-License-Identifier: MPL-2.0
//! Singleton keyed transition groups.
//!
//! A group holds at most one child, identified by a key. Showing a new key
//! replaces the previous child outright, so two children of the same group
//! never coexist. The child carries a progress value in `0.0..=1.0` that the
//! view uses as opacity.

use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
struct Child {
    key: String,
    progress: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransitionGroup {
    name: &'static str,
    child: Option<Child>,
}

impl TransitionGroup {
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self { name, child: None }
    }

    /// Mounts `key`, replacing any other child. Returns true if the child
    /// is new.
    pub fn show(&mut self, key: &str) -> bool {
        if self.key() == Some(key) {
            return false;
        }
        tracing::trace!(group = self.name, key, "transition: child mounted");
        self.child = Some(Child {
            key: key.to_string(),
            progress: 0.0,
        });
        true
    }

    /// Unmounts the child. Returns true if there was one.
    pub fn hide(&mut self) -> bool {
        let Some(child) = self.child.take() else {
            return false;
        };
        tracing::trace!(group = self.name, key = %child.key, "transition: child unmounted");
        true
    }

    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.child.as_ref().map(|child| child.key.as_str())
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.child.is_some()
    }

    /// Moves the child's progress forward by `elapsed / duration`.
    ///
    /// A zero `duration` completes the transition at once.
    pub fn advance(&mut self, elapsed: Duration, duration: Duration) {
        if let Some(child) = &mut self.child {
            let step = if duration.is_zero() {
                1.0
            } else {
                elapsed.as_secs_f32() / duration.as_secs_f32()
            };
            child.progress = (child.progress + step).clamp(0.0, 1.0);
        }
    }

    /// Progress of the child, `0.0` when there is none.
    #[must_use]
    pub fn opacity(&self) -> f32 {
        self.child.as_ref().map_or(0.0, |child| child.progress)
    }

    /// True while a mounted child has not reached full opacity.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.child.as_ref().is_some_and(|child| child.progress < 1.0)
    }
}

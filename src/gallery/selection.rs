// gallery/selection.rs

use bevy::prelude::*;

const DIGIT_KEYS: [KeyCode; 9] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
    KeyCode::Digit8,
    KeyCode::Digit9,
];

/// Resource tracking which demo page is mounted, if any
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveDemo {
    current: Option<usize>,
    count: usize,
}

impl ActiveDemo {
    pub fn opened(count: usize, index: usize) -> Self {
        Self {
            current: (index < count).then_some(index),
            count,
        }
    }

    pub fn closed(count: usize) -> Self {
        Self {
            current: None,
            count,
        }
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Open a page by index; out-of-range requests are ignored
    pub fn select(&mut self, index: usize) {
        if index < self.count {
            self.current = Some(index);
        }
    }

    /// Next page, wrapping around at the end
    pub fn next(&mut self) {
        if self.count == 0 {
            return;
        }
        self.current = Some(match self.current {
            Some(i) => (i + 1) % self.count,
            None => 0,
        });
    }

    /// Previous page, wrapping around at the start
    pub fn previous(&mut self) {
        if self.count == 0 {
            return;
        }
        self.current = Some(match self.current {
            Some(0) | None => self.count - 1,
            Some(i) => i - 1,
        });
    }

    /// Leave the current page (unmounts its trail)
    pub fn close(&mut self) {
        self.current = None;
    }
}

/// System: Footer navigation. 1-9 pick a page, arrows cycle, Escape closes.
pub fn select_demo_from_keys(keys: Res<ButtonInput<KeyCode>>, mut active: ResMut<ActiveDemo>) {
    let mut wanted = *active;

    for (index, key) in DIGIT_KEYS.iter().enumerate() {
        if keys.just_pressed(*key) {
            wanted.select(index);
        }
    }
    if keys.just_pressed(KeyCode::ArrowRight) {
        wanted.next();
    }
    if keys.just_pressed(KeyCode::ArrowLeft) {
        wanted.previous();
    }
    if keys.just_pressed(KeyCode::Escape) {
        wanted.close();
    }

    // Only flag a change when the page actually differs
    active.set_if_neq(wanted);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opened_out_of_range_is_closed() {
        assert_eq!(ActiveDemo::opened(3, 5).current(), None);
        assert_eq!(ActiveDemo::opened(3, 2).current(), Some(2));
    }

    #[test]
    fn test_next_wraps() {
        let mut demo = ActiveDemo::opened(4, 3);
        demo.next();
        assert_eq!(demo.current(), Some(0));
    }

    #[test]
    fn test_previous_wraps() {
        let mut demo = ActiveDemo::opened(4, 0);
        demo.previous();
        assert_eq!(demo.current(), Some(3));
    }

    #[test]
    fn test_reopen_after_close() {
        let mut demo = ActiveDemo::opened(4, 2);
        demo.close();
        assert_eq!(demo.current(), None);

        demo.next();
        assert_eq!(demo.current(), Some(0));
    }

    #[test]
    fn test_select_ignores_missing_pages() {
        let mut demo = ActiveDemo::opened(2, 1);
        demo.select(7);
        assert_eq!(demo.current(), Some(1));
    }

    #[test]
    fn test_empty_gallery_stays_closed() {
        let mut demo = ActiveDemo::closed(0);
        demo.next();
        demo.previous();
        assert_eq!(demo.current(), None);
    }
}

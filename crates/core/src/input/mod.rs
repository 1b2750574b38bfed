/// Pointer and focus events that can pause autoplay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    HoverEnter,
    HoverLeave,
    FocusIn,
    FocusOut,
}

/// Keyboard affordances of the carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Next,
    Previous,
    /// Select the currently active card.
    Activate,
}

/// Tracks hover and focus; pauses only when `pause_on_hover` is set.
#[derive(Debug, Clone, Default)]
pub struct InputController {
    pause_on_hover: bool,
    hovered: bool,
    focused: bool,
}

impl InputController {
    pub fn new(pause_on_hover: bool) -> Self {
        Self {
            pause_on_hover,
            ..Self::default()
        }
    }

    /// Applies an event and returns the resulting paused state.
    pub fn handle(&mut self, event: PointerEvent) -> bool {
        if self.pause_on_hover {
            match event {
                PointerEvent::HoverEnter => self.hovered = true,
                PointerEvent::HoverLeave => self.hovered = false,
                PointerEvent::FocusIn => self.focused = true,
                PointerEvent::FocusOut => self.focused = false,
            }
        }
        self.is_paused()
    }

    pub fn is_paused(&self) -> bool {
        self.hovered || self.focused
    }

    pub fn set_pause_on_hover(&mut self, enabled: bool) {
        self.pause_on_hover = enabled;
        if !enabled {
            self.hovered = false;
            self.focused = false;
        }
    }
}

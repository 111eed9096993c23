use super::types::MouseButtonState;

/// Held state plus one-frame edges for a single button.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct ButtonState {
    pub pressed: bool,
    pub just_pressed: bool,
    pub just_released: bool,
}

impl ButtonState {
    /// Applies a press or release and returns whether an edge was raised.
    ///
    /// Both edges are cleared first, so only the latest transition survives.
    /// Pressing an already-held button raises nothing; neither does releasing
    /// a button that is up.
    pub fn update(&mut self, action: MouseButtonState) -> bool {
        self.just_pressed = false;
        self.just_released = false;

        match action {
            MouseButtonState::Pressed => {
                if !self.pressed {
                    self.just_pressed = true;
                }
                self.pressed = true;
            }
            MouseButtonState::Released => {
                if self.pressed {
                    self.just_released = true;
                }
                self.pressed = false;
            }
        }

        self.just_pressed || self.just_released
    }

    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

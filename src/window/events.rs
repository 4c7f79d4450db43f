/// The status of application.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowEvent {
    /// The window has been closed.
    Closed,
    /// The window gained focus of user input.
    GainFocus,
    /// The window lost focus of user input.
    LostFocus,
    /// The size in points of window has changed.
    Resized(u32, u32),
}

/// The enumerations of all events that come from various kinds of user input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyboardPressed { key: Key },
    KeyboardReleased { key: Key },
    MousePressed { button: MouseButton },
    MouseReleased { button: MouseButton },
    /// Relative motion of the mouse, with the y axis pointing up.
    MouseMoved { delta: (f32, f32) },
    /// Scroll amount, in lines.
    MouseWheel { delta: (f32, f32) },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    Window(WindowEvent),
    InputDevice(InputEvent),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u8),
}

/// The keys the renderer knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    A,
    B,
    C,
    D,
    E,
    F,
    Q,
    R,
    S,
    W,
    X,
    Z,
    Escape,
    Space,
    Return,
    Tab,
    Left,
    Up,
    Right,
    Down,
    LShift,
    RShift,
    LControl,
    RControl,
}

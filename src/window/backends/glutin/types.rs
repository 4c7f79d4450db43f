use glutin;

use super::super::super::events::{Event, InputEvent, Key, MouseButton, WindowEvent};

pub fn from_event(source: glutin::Event) -> Option<Event> {
    match source {
        glutin::Event::WindowEvent { event, .. } => from_window_event(&event),

        glutin::Event::DeviceEvent {
            event: glutin::DeviceEvent::MouseMotion { delta },
            ..
        } => Some(Event::InputDevice(InputEvent::MouseMoved {
            delta: (delta.0 as f32, -delta.1 as f32),
        })),

        _ => None,
    }
}

fn from_window_event(source: &glutin::WindowEvent) -> Option<Event> {
    match *source {
        glutin::WindowEvent::CloseRequested => Some(Event::Window(WindowEvent::Closed)),

        glutin::WindowEvent::Focused(v) => {
            if v {
                Some(Event::Window(WindowEvent::GainFocus))
            } else {
                Some(Event::Window(WindowEvent::LostFocus))
            }
        }

        glutin::WindowEvent::Resized(glutin::dpi::LogicalSize { width, height }) => Some(
            Event::Window(WindowEvent::Resized(width as u32, height as u32)),
        ),

        glutin::WindowEvent::MouseWheel { delta, .. } => match delta {
            glutin::MouseScrollDelta::LineDelta(x, y) => {
                Some(Event::InputDevice(InputEvent::MouseWheel {
                    delta: (x as f32, y as f32),
                }))
            }
            glutin::MouseScrollDelta::PixelDelta(pos) => {
                Some(Event::InputDevice(InputEvent::MouseWheel {
                    delta: (pos.x as f32, pos.y as f32),
                }))
            }
        },

        glutin::WindowEvent::MouseInput {
            state: glutin::ElementState::Pressed,
            button,
            ..
        } => Some(Event::InputDevice(InputEvent::MousePressed {
            button: button.into(),
        })),

        glutin::WindowEvent::MouseInput {
            state: glutin::ElementState::Released,
            button,
            ..
        } => Some(Event::InputDevice(InputEvent::MouseReleased {
            button: button.into(),
        })),

        glutin::WindowEvent::KeyboardInput {
            input:
                glutin::KeyboardInput {
                    state: glutin::ElementState::Pressed,
                    virtual_keycode: Some(key),
                    ..
                },
            ..
        } => from_virtual_key_code(key)
            .map(|key| Event::InputDevice(InputEvent::KeyboardPressed { key })),

        glutin::WindowEvent::KeyboardInput {
            input:
                glutin::KeyboardInput {
                    state: glutin::ElementState::Released,
                    virtual_keycode: Some(key),
                    ..
                },
            ..
        } => from_virtual_key_code(key)
            .map(|key| Event::InputDevice(InputEvent::KeyboardReleased { key })),

        _ => None,
    }
}

impl From<glutin::MouseButton> for MouseButton {
    fn from(mouse: glutin::MouseButton) -> Self {
        match mouse {
            glutin::MouseButton::Left => MouseButton::Left,
            glutin::MouseButton::Right => MouseButton::Right,
            glutin::MouseButton::Middle => MouseButton::Middle,
            glutin::MouseButton::Other(id) => MouseButton::Other(id),
        }
    }
}

fn from_virtual_key_code(key: glutin::VirtualKeyCode) -> Option<Key> {
    match key {
        glutin::VirtualKeyCode::A => Some(Key::A),
        glutin::VirtualKeyCode::B => Some(Key::B),
        glutin::VirtualKeyCode::C => Some(Key::C),
        glutin::VirtualKeyCode::D => Some(Key::D),
        glutin::VirtualKeyCode::E => Some(Key::E),
        glutin::VirtualKeyCode::F => Some(Key::F),
        glutin::VirtualKeyCode::Q => Some(Key::Q),
        glutin::VirtualKeyCode::R => Some(Key::R),
        glutin::VirtualKeyCode::S => Some(Key::S),
        glutin::VirtualKeyCode::W => Some(Key::W),
        glutin::VirtualKeyCode::X => Some(Key::X),
        glutin::VirtualKeyCode::Z => Some(Key::Z),
        glutin::VirtualKeyCode::Escape => Some(Key::Escape),
        glutin::VirtualKeyCode::Space => Some(Key::Space),
        glutin::VirtualKeyCode::Return => Some(Key::Return),
        glutin::VirtualKeyCode::Tab => Some(Key::Tab),
        glutin::VirtualKeyCode::Left => Some(Key::Left),
        glutin::VirtualKeyCode::Up => Some(Key::Up),
        glutin::VirtualKeyCode::Right => Some(Key::Right),
        glutin::VirtualKeyCode::Down => Some(Key::Down),
        glutin::VirtualKeyCode::LShift => Some(Key::LShift),
        glutin::VirtualKeyCode::RShift => Some(Key::RShift),
        glutin::VirtualKeyCode::LControl => Some(Key::LControl),
        glutin::VirtualKeyCode::RControl => Some(Key::RControl),
        _ => None,
    }
}

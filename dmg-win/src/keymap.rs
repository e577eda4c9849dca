use dmg::{Button, Joypad};
use winit::event::VirtualKeyCode;

/// Direction of a key transition reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Pressed,
    Released,
    /// The host is repeating a press while the key is held down.
    Repeat,
}

/// Binding of a host keyboard key to a joypad button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub key: VirtualKeyCode,
    pub button: Button,
}

impl KeyBinding {
    pub const fn new(key: VirtualKeyCode, button: Button) -> Self {
        Self { key, button }
    }
}

/// Default keyboard layout.
pub const DEFAULT_BINDINGS: &[KeyBinding] = &[
    KeyBinding::new(VirtualKeyCode::Return, Button::Start),
    KeyBinding::new(VirtualKeyCode::Space, Button::Select),
    KeyBinding::new(VirtualKeyCode::S, Button::A),
    KeyBinding::new(VirtualKeyCode::A, Button::B),
    KeyBinding::new(VirtualKeyCode::Up, Button::Up),
    KeyBinding::new(VirtualKeyCode::Down, Button::Down),
    KeyBinding::new(VirtualKeyCode::Left, Button::Left),
    KeyBinding::new(VirtualKeyCode::Right, Button::Right),
];

/// Input mapper
///
/// Translates host key transitions into joypad notifications.
///
/// The mapping is fixed when the map is built. Keys without a binding are
/// dropped silently, since most of the keyboard is unbound. There is no
/// memory of earlier transitions: two presses in a row are forwarded as two
/// presses, and it is up to the [`Joypad`] to treat them idempotently.
#[derive(Debug, Clone, Copy)]
pub struct KeyMap {
    bindings: &'static [KeyBinding],
}

impl KeyMap {
    pub const fn new(bindings: &'static [KeyBinding]) -> Self {
        Self { bindings }
    }

    pub fn bindings(&self) -> &'static [KeyBinding] {
        self.bindings
    }

    /// Look up the button bound to the given key.
    pub fn map_key(&self, key: VirtualKeyCode) -> Option<Button> {
        self.bindings
            .iter()
            .find(|binding| binding.key == key)
            .map(|binding| binding.button)
    }

    /// Forward a single key transition to the joypad.
    pub fn dispatch<J: Joypad + ?Sized>(
        &self,
        key: VirtualKeyCode,
        transition: Transition,
        joypad: &mut J,
    ) {
        let Some(button) = self.map_key(key) else {
            return;
        };

        match transition {
            Transition::Pressed => {
                log::trace!("{key:?} pressed {button}");
                joypad.button_pressed(button);
            }
            Transition::Released => {
                log::trace!("{key:?} released {button}");
                joypad.button_released(button);
            }
            // Neither a press nor a release.
            Transition::Repeat => {}
        }
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::new(DEFAULT_BINDINGS)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[derive(Debug, PartialEq, Eq)]
    enum Note {
        Pressed(Button),
        Released(Button),
    }

    #[derive(Default)]
    struct Recorder(Vec<Note>);

    impl Joypad for Recorder {
        fn button_pressed(&mut self, button: Button) {
            self.0.push(Note::Pressed(button));
        }

        fn button_released(&mut self, button: Button) {
            self.0.push(Note::Released(button));
        }
    }

    /// Every key winit knows about, enumerated by variant index.
    fn all_keys() -> Vec<VirtualKeyCode> {
        use serde::{de::value::U32Deserializer, Deserialize};

        (0u32..)
            .map_while(|index| {
                let deserializer = U32Deserializer::<serde::de::value::Error>::new(index);
                VirtualKeyCode::deserialize(deserializer).ok()
            })
            .collect()
    }

    #[test]
    fn test_default_table() {
        let keymap = KeyMap::default();
        let expected = [
            (VirtualKeyCode::Return, Button::Start),
            (VirtualKeyCode::Space, Button::Select),
            (VirtualKeyCode::S, Button::A),
            (VirtualKeyCode::A, Button::B),
            (VirtualKeyCode::Up, Button::Up),
            (VirtualKeyCode::Down, Button::Down),
            (VirtualKeyCode::Left, Button::Left),
            (VirtualKeyCode::Right, Button::Right),
        ];

        assert_eq!(keymap.bindings().len(), expected.len());
        for (key, button) in expected {
            assert_eq!(keymap.map_key(key), Some(button), "{key:?}");
        }
    }

    #[test]
    fn test_every_button_bound_once() {
        for button in Button::ALL {
            let count = DEFAULT_BINDINGS
                .iter()
                .filter(|binding| binding.button == button)
                .count();
            assert_eq!(count, 1, "{button}");
        }
    }

    #[test]
    fn test_bound_press_release() {
        let keymap = KeyMap::default();

        for binding in DEFAULT_BINDINGS {
            let mut joypad = Recorder::default();
            keymap.dispatch(binding.key, Transition::Pressed, &mut joypad);
            assert_eq!(joypad.0, vec![Note::Pressed(binding.button)]);

            let mut joypad = Recorder::default();
            keymap.dispatch(binding.key, Transition::Released, &mut joypad);
            assert_eq!(joypad.0, vec![Note::Released(binding.button)]);
        }
    }

    #[test]
    fn test_all_keys_enumerated() {
        let keys = all_keys();

        assert!(keys.len() >= 100, "only {} keys", keys.len());
        for binding in DEFAULT_BINDINGS {
            assert!(keys.contains(&binding.key), "{:?}", binding.key);
        }
    }

    #[test]
    fn test_unbound_ignored() {
        let keymap = KeyMap::default();
        let mut unbound = 0;

        for key in all_keys() {
            let mut joypad = Recorder::default();
            keymap.dispatch(key, Transition::Pressed, &mut joypad);
            keymap.dispatch(key, Transition::Repeat, &mut joypad);
            keymap.dispatch(key, Transition::Released, &mut joypad);

            match keymap.map_key(key) {
                Some(button) => assert_eq!(
                    joypad.0,
                    vec![Note::Pressed(button), Note::Released(button)],
                    "{key:?}"
                ),
                None => {
                    assert!(joypad.0.is_empty(), "{key:?}");
                    unbound += 1;
                }
            }
        }

        assert_eq!(unbound, all_keys().len() - DEFAULT_BINDINGS.len());
    }

    #[test]
    fn test_repeat_ignored() {
        let keymap = KeyMap::default();
        let mut joypad = Recorder::default();

        for binding in DEFAULT_BINDINGS {
            keymap.dispatch(binding.key, Transition::Repeat, &mut joypad);
        }

        assert!(joypad.0.is_empty());
    }

    #[test]
    fn test_no_press_suppression() {
        let keymap = KeyMap::default();
        let mut joypad = Recorder::default();

        keymap.dispatch(VirtualKeyCode::S, Transition::Pressed, &mut joypad);
        keymap.dispatch(VirtualKeyCode::S, Transition::Pressed, &mut joypad);

        assert_eq!(
            joypad.0,
            vec![Note::Pressed(Button::A), Note::Pressed(Button::A)]
        );
    }

    #[test]
    fn test_custom_table() {
        static ARROWS_ONLY: &[KeyBinding] = &[KeyBinding::new(VirtualKeyCode::W, Button::Up)];
        let keymap = KeyMap::new(ARROWS_ONLY);

        assert_eq!(keymap.map_key(VirtualKeyCode::W), Some(Button::Up));
        assert_eq!(keymap.map_key(VirtualKeyCode::Up), None);
    }
}

// game-translation-assistant/src/hotkey.rs

// ============================================================================
// MÓDULO HOTKEY - Hotkeys globais usando device_query
// ============================================================================
//
// F10 = captura de região, F9 = esconder/mostrar.
// Funcionam mesmo com a janela escondida ou sem foco (polling do teclado).
// Cada tecla dispara uma vez por pressionamento (borda de subida).
//
// ============================================================================

use device_query::{DeviceQuery, DeviceState, Keycode};

/// Ações disparadas por hotkey
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotkeyAction {
    Capture,
    ToggleVisibility,
}

const BINDINGS: [(Keycode, HotkeyAction); 2] = [
    (Keycode::F10, HotkeyAction::Capture),
    (Keycode::F9, HotkeyAction::ToggleVisibility),
];

/// Estrutura que gerencia hotkeys
pub struct HotkeyManager {
    device_state: DeviceState,
    /// Teclas (das que nos interessam) pressionadas na última verificação
    held: Vec<Keycode>,
}

impl HotkeyManager {
    /// Cria um novo gerenciador de hotkeys
    pub fn new() -> Self {
        info!("⌨️  Configurando detecção de teclas...");
        info!("   F10 = capturar região | F9 = esconder/mostrar");

        HotkeyManager {
            device_state: DeviceState::new(),
            held: Vec::new(),
        }
    }

    /// Retorna as ações cujas teclas acabaram de ser pressionadas
    pub fn poll(&mut self) -> Vec<HotkeyAction> {
        let keys = self.device_state.get_keys();
        let (actions, held) = newly_pressed(&self.held, &keys);
        self.held = held;
        actions
    }
}

/// Compara o estado anterior com as teclas atuais.
///
/// Retorna (ações novas, teclas vinculadas pressionadas agora).
fn newly_pressed(previous: &[Keycode], current: &[Keycode]) -> (Vec<HotkeyAction>, Vec<Keycode>) {
    let mut actions = Vec::new();
    let mut held = Vec::new();

    for (key, action) in BINDINGS {
        if current.contains(&key) {
            if !previous.contains(&key) {
                actions.push(action);
            }
            held.push(key);
        }
    }

    (actions, held)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_per_press() {
        let (actions, held) = newly_pressed(&[], &[Keycode::F10]);
        assert_eq!(actions, vec![HotkeyAction::Capture]);

        // Tecla segurada não repete
        let (actions, held) = newly_pressed(&held, &[Keycode::F10]);
        assert!(actions.is_empty());

        // Solta e aperta de novo
        let (_, held) = newly_pressed(&held, &[]);
        let (actions, _) = newly_pressed(&held, &[Keycode::F10]);
        assert_eq!(actions, vec![HotkeyAction::Capture]);
    }

    #[test]
    fn unrelated_keys_are_ignored() {
        let (actions, held) = newly_pressed(&[], &[Keycode::A, Keycode::F9, Keycode::LShift]);
        assert_eq!(actions, vec![HotkeyAction::ToggleVisibility]);
        assert_eq!(held, vec![Keycode::F9]);
    }
}

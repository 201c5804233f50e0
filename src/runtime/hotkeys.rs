// game-translation-assistant/src/runtime/hotkeys.rs

// ============================================================================
// THREAD DE HOTKEYS (roda em background)
// ============================================================================
// Faz polling do teclado e manda comandos para a UI. Termina sozinha quando
// a UI fecha (o canal de comandos é desconectado).
// ============================================================================

use std::thread;
use std::time::Duration;

use crossbeam_channel::Sender;

use crate::app_state::AppCommand;
use crate::hotkey::{HotkeyAction, HotkeyManager};
use crate::translator::RepaintNotifier;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

fn command_for(action: HotkeyAction) -> AppCommand {
    match action {
        HotkeyAction::Capture => AppCommand::StartCapture,
        HotkeyAction::ToggleVisibility => AppCommand::ToggleVisibility,
    }
}

pub fn start_hotkey_thread(command_sender: Sender<AppCommand>, notify: RepaintNotifier) {
    thread::spawn(move || {
        info!("⌨️  Thread de hotkeys iniciada");

        let mut hotkey_manager = HotkeyManager::new();

        loop {
            for action in hotkey_manager.poll() {
                match action {
                    HotkeyAction::Capture => {
                        info!("");
                        info!("🎯 ============================================");
                        info!("🎯 F10 - SOLICITANDO CAPTURA DE REGIÃO");
                        info!("🎯 ============================================");
                    }
                    HotkeyAction::ToggleVisibility => {
                        info!("👁️  F9 - alternando visibilidade");
                    }
                }

                if command_sender.send(command_for(action)).is_err() {
                    info!("⌨️  UI encerrada, parando thread de hotkeys");
                    return;
                }

                // A UI pode estar parada esperando eventos
                notify();
            }

            thread::sleep(POLL_INTERVAL);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_map_to_ui_commands() {
        assert_eq!(command_for(HotkeyAction::Capture), AppCommand::StartCapture);
        assert_eq!(
            command_for(HotkeyAction::ToggleVisibility),
            AppCommand::ToggleVisibility
        );
    }
}

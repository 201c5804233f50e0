// game-translation-assistant/src/region_selector.rs

// ============================================================================
// MÓDULO REGION SELECTOR - Máquina de estados da seleção de região
// ============================================================================
//
//   Idle ──begin──▶ Capturing ──snapshot_taken──▶ Selecting
//                                                   │
//                      pointer_up (>= 10x10) ───────┼──▶ Committed
//                      pointer_up (< 10) / cancel ──┴──▶ Cancelled
//
// Não depende do egui: o overlay (overlay/selection.rs) só repassa eventos do
// mouse/teclado. As coordenadas do ponteiro são LOCAIS ao overlay; somando a
// origem da caixa combinada obtemos o retângulo absoluto.
//
// ============================================================================

use crate::geometry::ScreenRect;

/// Menor largura/altura aceita (pixels de dispositivo)
pub const MIN_SELECTION_SIZE: u32 = 10;

/// Distância vertical entre o retângulo e o rótulo "W x H"
pub const LABEL_OFFSET: i32 = 20;

/// Por que a sessão terminou sem região
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// Seleção menor que 10x10
    TooSmall,
    /// ESC ou cancelamento explícito
    User,
    /// A captura do desktop falhou
    CaptureFailed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    /// Janela principal escondida, capturando o desktop
    Capturing,
    /// Overlay aberto, esperando o arraste
    Selecting {
        bounds: ScreenRect,
        start: Option<(i32, i32)>,
        current: Option<(i32, i32)>,
    },
    /// Região escolhida em coordenadas absolutas
    Committed(ScreenRect),
    Cancelled(CancelReason),
}

/// Sessão de captura (no máximo uma por vez)
#[derive(Debug)]
pub struct CaptureSession {
    state: CaptureState,
}

impl Default for CaptureSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureSession {
    pub fn new() -> Self {
        CaptureSession {
            state: CaptureState::Idle,
        }
    }

    pub fn state(&self) -> &CaptureState {
        &self.state
    }

    /// Capturando ou selecionando
    pub fn is_active(&self) -> bool {
        matches!(
            self.state,
            CaptureState::Capturing | CaptureState::Selecting { .. }
        )
    }

    /// Inicia uma nova sessão; qualquer sessão anterior é descartada
    pub fn begin(&mut self) {
        if self.is_active() {
            debug!("   Sessão de captura anterior descartada");
        }
        self.state = CaptureState::Capturing;
    }

    /// Screenshot do desktop pronta: abre a seleção
    pub fn snapshot_taken(&mut self, bounds: ScreenRect) {
        if self.state == CaptureState::Capturing {
            self.state = CaptureState::Selecting {
                bounds,
                start: None,
                current: None,
            };
        }
    }

    /// A captura do desktop falhou
    pub fn capture_failed(&mut self) {
        if self.state == CaptureState::Capturing {
            self.state = CaptureState::Cancelled(CancelReason::CaptureFailed);
        }
    }

    pub fn pointer_down(&mut self, pos: (i32, i32)) {
        if let CaptureState::Selecting { start, current, .. } = &mut self.state {
            *start = Some(pos);
            *current = Some(pos);
        }
    }

    pub fn pointer_moved(&mut self, pos: (i32, i32)) {
        if let CaptureState::Selecting {
            start: Some(_),
            current,
            ..
        } = &mut self.state
        {
            *current = Some(pos);
        }
    }

    /// Solta o botão: decide entre Committed e Cancelled(TooSmall).
    ///
    /// Sem um pointer_down anterior nada acontece.
    pub fn pointer_up(&mut self, pos: (i32, i32)) {
        let CaptureState::Selecting {
            bounds,
            start: Some(start),
            ..
        } = self.state
        else {
            return;
        };

        let local = ScreenRect::from_corners(start, pos);

        self.state = if local.width < MIN_SELECTION_SIZE || local.height < MIN_SELECTION_SIZE {
            CaptureState::Cancelled(CancelReason::TooSmall)
        } else {
            CaptureState::Committed(local.offset(bounds.x, bounds.y))
        };
    }

    /// ESC dentro do overlay
    pub fn cancel(&mut self) {
        if self.is_active() {
            self.state = CaptureState::Cancelled(CancelReason::User);
        }
    }

    /// Volta para Idle (depois que o resultado foi consumido)
    pub fn reset(&mut self) {
        self.state = CaptureState::Idle;
    }

    /// Retângulo sendo arrastado, em coordenadas locais do overlay
    pub fn current_rect(&self) -> Option<ScreenRect> {
        match self.state {
            CaptureState::Selecting {
                start: Some(start),
                current: Some(current),
                ..
            } => Some(ScreenRect::from_corners(start, current)),
            _ => None,
        }
    }
}

/// Texto do rótulo de tamanho
pub fn size_label(rect: &ScreenRect) -> String {
    format!("{} x {}", rect.width, rect.height)
}

/// Posição do rótulo: centralizado no retângulo, 20 px acima dele; se isso
/// sair do overlay (y < 0), 20 px abaixo da borda inferior.
pub fn label_position(rect: &ScreenRect) -> (f32, i32) {
    let center_x = rect.x as f32 + rect.width as f32 / 2.0;
    let above = rect.y - LABEL_OFFSET;

    if above < 0 {
        (center_x, rect.bottom() + LABEL_OFFSET)
    } else {
        (center_x, above)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selecting(bounds: ScreenRect) -> CaptureSession {
        let mut session = CaptureSession::new();
        session.begin();
        session.snapshot_taken(bounds);
        session
    }

    #[test]
    fn drag_commits_absolute_rect() {
        let mut session = selecting(ScreenRect::new(-1280, 0, 3200, 1080));

        session.pointer_down((300, 400));
        session.pointer_moved((350, 420));
        session.pointer_up((100, 200));

        assert_eq!(
            session.state(),
            &CaptureState::Committed(ScreenRect::new(-1180, 200, 200, 200))
        );
        assert!(!session.is_active());
    }

    #[test]
    fn selection_under_ten_pixels_is_cancelled() {
        let mut session = selecting(ScreenRect::new(0, 0, 1920, 1080));
        session.pointer_down((10, 10));
        session.pointer_up((19, 300));
        assert_eq!(
            session.state(),
            &CaptureState::Cancelled(CancelReason::TooSmall)
        );

        let mut session = selecting(ScreenRect::new(0, 0, 1920, 1080));
        session.pointer_down((10, 10));
        session.pointer_up((20, 20));
        assert!(matches!(session.state(), CaptureState::Committed(_)));
    }

    #[test]
    fn escape_cancels() {
        let mut session = selecting(ScreenRect::new(0, 0, 100, 100));
        session.pointer_down((1, 1));
        session.cancel();
        assert_eq!(session.state(), &CaptureState::Cancelled(CancelReason::User));

        session.reset();
        assert_eq!(session.state(), &CaptureState::Idle);
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut session = selecting(ScreenRect::new(0, 0, 100, 100));
        session.pointer_moved((50, 50));
        session.pointer_up((80, 80));
        assert!(matches!(session.state(), CaptureState::Selecting { .. }));
        assert!(session.current_rect().is_none());
    }

    #[test]
    fn new_session_replaces_previous() {
        let mut session = selecting(ScreenRect::new(0, 0, 100, 100));
        session.pointer_down((5, 5));
        session.begin();
        assert_eq!(session.state(), &CaptureState::Capturing);
        assert!(session.current_rect().is_none());
    }

    #[test]
    fn capture_failure_cancels() {
        let mut session = CaptureSession::new();
        session.begin();
        session.capture_failed();
        assert_eq!(
            session.state(),
            &CaptureState::Cancelled(CancelReason::CaptureFailed)
        );
    }

    #[test]
    fn label_sits_above_unless_off_overlay() {
        let rect = ScreenRect::new(100, 50, 200, 80);
        assert_eq!(label_position(&rect), (200.0, 30));
        assert_eq!(size_label(&rect), "200 x 80");

        let near_top = ScreenRect::new(0, 5, 40, 30);
        assert_eq!(label_position(&near_top), (20.0, 55));
    }
}

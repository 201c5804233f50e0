// game-translation-assistant/src/runtime.rs

// ============================================================================
// THREADS DE FUNDO
// ============================================================================

pub mod hotkeys;

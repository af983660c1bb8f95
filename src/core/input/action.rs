//=========================================================================
// Action Trait
//=========================================================================
//
// Game-defined action trait.
//
// Actions are opaque identifiers routed by the engine and interpreted by
// the game: the input system maps raw key events onto them and never
// looks inside.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt::Debug;
use std::hash::Hash;

//=== Action Trait ========================================================

/// Marker trait for game-defined action enums.
///
/// Actions represent high-level commands (MoveForward, ToggleWireframe,
/// Exit) mapped from raw inputs.
///
/// # Requirements
///
/// - `Copy + Eq + Hash`: Efficient passing and deduplication
/// - `Debug`: Logging support
/// - `Send + 'static`: Thread-safe transfer
///
/// # Example
///
/// ```
/// use lumen_engine::core::input::Action;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum GameAction { Jump, Shoot, Reload }
///
/// impl Action for GameAction {}
/// ```
pub trait Action: 'static + Send + Copy + Eq + Hash + Debug {}

//=========================================================================
// Unit Tests
//=========================================================================

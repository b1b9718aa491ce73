//! # Neuroprey - Predator/Prey Neuroevolution
//!
//! A simulation of prey and predator agents steered by small feed-forward
//! neural networks, evolved across generations by a survival-fitness genetic
//! algorithm.
//!
//! ## Features
//!
//! - Pluggable genome/network engine (an ndarray MLP engine ships by default)
//! - Observation vectors: nearest food/opponent, vision-cone rays, action memory
//! - Energy-driven survival with hard world bounds
//! - Truncation selection with atomic whole-population turnover
//! - Predator/prey coupling with capture rewards
//! - Read-only snapshots for the macroquad/egui presentation layer
//!
//! ## Core Modules
//!
//! - [`simulation::agent`] - Agent state, actuation, action memory
//! - [`simulation::sensor`] - Observation vector construction
//! - [`simulation::environment`] - Food lifecycle and interaction resolution
//! - [`simulation::evolution`] - Generation turnover and fitness history
//! - [`simulation::engine`] - The genome/network capability seam
//! - [`simulation::world`] - The synchronous tick loop

/// Core simulation logic and data structures.
pub mod simulation {
    /// Agent state, actuation model, and the action-memory ring.
    pub mod agent;
    /// Genome/network engine seam and the default MLP engine.
    pub mod engine;
    /// Food lifecycle and proximity interaction resolution.
    pub mod environment;
    /// Generational turnover and fitness history.
    pub mod evolution;
    /// Geometric helpers for distances and ray tests.
    pub mod geometry;
    /// Simulation parameters and startup validation.
    pub mod params;
    /// Observation vector construction.
    pub mod sensor;
    /// Read-only view types for the presentation layer.
    pub mod snapshot;
    /// The world tick loop and simulation context.
    pub mod world;
}

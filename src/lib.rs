//! Lifeline - Survival Camp Simulation Core
//!
//! Survivors with decaying needs, a per-survivor activity queue, timed
//! activities, and player-authored guidelines that refill the queue.

pub mod actions;
pub mod city;
pub mod core;
pub mod entity;
pub mod rules;
pub mod simulation;
pub mod world;

//! Colony Guards - combat and patrol AI for colony guard agents

pub mod combat;
pub mod core;
pub mod entity;
pub mod guard;
pub mod simulation;
pub mod world;

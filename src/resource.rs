//! The resource module encapsulates domain entities for use with Bevy.

use std::ops::{Deref, DerefMut};

use bevy::ecs::system::Resource;

use line_sim::domain;

#[derive(Resource)]
pub struct SimulationRes(domain::Simulation);

impl Deref for SimulationRes {
    type Target = domain::Simulation;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for SimulationRes {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<domain::Simulation> for SimulationRes {
    fn from(value: domain::Simulation) -> Self {
        Self(value)
    }
}

#[derive(Resource, Clone, Copy)]
pub struct UpdateOptionsRes(domain::UpdateOptions);

impl Deref for UpdateOptionsRes {
    type Target = domain::UpdateOptions;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<domain::UpdateOptions> for UpdateOptionsRes {
    fn from(value: domain::UpdateOptions) -> Self {
        Self(value)
    }
}

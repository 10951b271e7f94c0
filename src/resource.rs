//! The resource module encapsulates domain entities for use with Bevy.

use std::ops::{Deref, DerefMut};

use bevy::ecs::system::Resource;

use crate::{config::PlannerConfig, domain};

#[derive(Resource)]
pub struct RoomRes(domain::Room);

impl Deref for RoomRes {
    type Target = domain::Room;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for RoomRes {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<domain::Room> for RoomRes {
    fn from(value: domain::Room) -> Self {
        Self(value)
    }
}

#[derive(Resource)]
pub struct ConfigRes(PlannerConfig);

impl Deref for ConfigRes {
    type Target = PlannerConfig;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<PlannerConfig> for ConfigRes {
    fn from(value: PlannerConfig) -> Self {
        Self(value)
    }
}

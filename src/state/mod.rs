// Entity registry and containment state

mod entity;
mod registry;

pub use entity::{Entity, EntityProfile, Evaluation};
pub use registry::EntityRegistry;

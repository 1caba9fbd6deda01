//! Scene graph: worlds, layers and game objects

mod graph;
mod layer;
mod object;
mod slots;
mod world;

pub use graph::SceneGraph;
pub use layer::{Layer, LayerBehavior, Parallax};
pub use object::{draw_object, GameObject};
pub use slots::{ObjectId, ObjectSlots};
pub use world::{FrameContext, PlainWorld, World, WorldHooks, WorldRequest};

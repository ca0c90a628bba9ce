pub mod code_generator;
pub mod expiry_sweeper;
pub mod identity;
pub mod link_service;

pub use code_generator::{CodeGenerator, SaltSource, ThreadRngSalt};
pub use expiry_sweeper::{ExpirySweeper, SweepStats, SweepTarget};
pub use identity::{IdentityProvider, OwnerId, RandomIdentity};
pub use link_service::{CreateResult, LinkService, OpResult, OpenResult};

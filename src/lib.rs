pub mod config;
pub mod storage;
pub mod training;

pub use config::TrainerConfig;
pub use storage::{FileStorage, KeyValueStore, MemoryStorage};
pub use training::TrainingEngine;

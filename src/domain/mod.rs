// Domain layer - Matrix, scoring and classification, free of I/O
pub mod build;
pub mod dashboard;
pub mod error;
pub mod health;
pub mod status;
pub mod task;

// Infrastructure layer - External dependencies and adapters
pub mod cirrus_repository;
pub mod config;
pub mod report;

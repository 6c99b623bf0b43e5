// Application layer - Use cases over the CI repository
pub mod build_filter;
pub mod ci_repository;
pub mod dashboard_service;
pub mod matrix_builder;

//! Business logic services

pub mod balance;
pub mod estimator;
pub mod export;
pub mod geo_route;
pub mod import;
pub mod routing;
pub mod scenario_check;
pub mod travel_matrix;
pub mod validator;

pub mod access_gate;
pub mod booking_workflow;
pub mod payment;
pub mod pricing_service;
pub mod reporting_service;

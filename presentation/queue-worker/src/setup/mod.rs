pub mod dependency_injection;

//! # Scenario Tests
//!
//! End-to-end checks of the sunrise/sunset predicates against known places and
//! dates, driven through real and fixed-offset timezones.

//! Hit testing for interactive charts
//!
//! Maps screen coordinates and raw pointer events to logical chart
//! elements. The sensitivity index precomputes invisible hit regions from
//! a chart definition; the hit tester resolves events against it with a
//! fixed precedence over natively rendered elements, and translates
//! resolved ids into semantic interaction events.

pub mod hit_tester;
pub mod sensitivity;

pub use hit_tester::HitTester;
pub use sensitivity::{CategoryArea, SensitivityArea, SensitivityIndex};

//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises a specific subsystem
//! against the mock PWM port.  All tests run on the host (x86_64) with no
//! real hardware required.

mod controller_tests;
mod http_tests;
mod startup_tests;

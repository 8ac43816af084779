//! Integration test driver for `tests/integration/` submodule.
//!
//! Exercises the orchestrator end to end against mock adapters. All
//! tests run on the host with no real hardware required.

mod full_cycle_tests;
mod mock_hw;

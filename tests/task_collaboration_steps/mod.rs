//! Step definitions for task collaboration scenarios.


mod given;

//! Common test utilities and mock implementations

pub mod test_utils;

pub use mock_interface::{MockError, MockInterface, Operation};
pub use test_utils::{MockDelay, create_mock_driver};

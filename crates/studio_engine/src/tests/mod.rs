//! Frame-loop integration tests

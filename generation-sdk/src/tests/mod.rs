//! Unit tests for the Generation SDK

pub mod openai_mock_tests;

//! Tests for the Polyglot core

mod support;

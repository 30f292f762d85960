//! End-to-end tests for dynmodels-gen live in `tests/`.

//! End-to-end diagnostic scenarios. All content lives under `tests/`.

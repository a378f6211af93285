/*
 * mod.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Command implementations for the bibcite CLI.

pub mod render;

//! Core library for composing technical drawing sheets: a fixed-size occupancy
//! grid, category-driven part footprints, greedy placement and the collaborator
//! utilities around them (persistence, templates, history, access control).

/// Access control for project operations (roles, tokens, permission checks)
pub mod auth;

/// Overlap detection and conflict resolution outside the grid's cell model
pub mod collision;

/// Entities to model drawing sheets: parts, the sheet grid, projects, templates
pub mod entities;

/// Geometric primitives and traits
pub mod geometry;

/// Hash-chained version history of project snapshots
pub mod history;

/// Translation catalog for user-facing strings
pub mod i18n;

/// Importing projects into and exporting sheets out of this library
pub mod io;

/// Footprint rules and the layout manager
pub mod layout;

/// Validation of referenced image resolutions against print formats
pub mod media;

/// Helper functions which do not belong to any specific module
pub mod util;
